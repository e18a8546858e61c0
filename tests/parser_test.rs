use pretty_assertions::assert_eq;

use truthtab::parser::*;
use truthtab::parser_io::SyntaxTree;
use truthtab::Variable;

fn var(c: char) -> Variable {
    Variable::new(c).expect("letter")
}

fn v(c: char) -> Box<Formula> {
    Box::new(Formula::Var(var(c)))
}

#[test]
fn test_basic_tokens() {
    assert_eq!(
        tokenize("x ∧ y\u{0305}"),
        vec![Token::Var(var('x')), Token::And, Token::Var(var('y')), Token::Overline]
    );
    assert_eq!(
        tokenize("¬(a∨0)"),
        vec![
            Token::Not,
            Token::OpenParen,
            Token::Var(var('a')),
            Token::Or,
            Token::Const(false),
            Token::CloseParen
        ]
    );
}

#[test]
fn test_ascii_aliases() {
    assert_eq!(tokenize("a & b"), tokenize("a ∧ b"));
    assert_eq!(tokenize("a · b"), tokenize("a ∧ b"));
    assert_eq!(tokenize("a | b"), tokenize("a ∨ b"));
    assert_eq!(tokenize("a + b"), tokenize("a ∨ b"));
    assert_eq!(tokenize("!a"), tokenize("¬a"));
    assert_eq!(tokenize("~a"), tokenize("¬a"));
}

#[test]
fn test_keywords_are_whole_words() {
    assert_eq!(
        tokenize("a AND NOT b OR c"),
        vec![
            Token::Var(var('a')),
            Token::And,
            Token::Not,
            Token::Var(var('b')),
            Token::Or,
            Token::Var(var('c')),
        ]
    );

    // not exactly a keyword, so these are the letters N, O, T and a
    assert_eq!(
        tokenize("NOTa"),
        vec![
            Token::Var(var('N')),
            Token::Var(var('O')),
            Token::Var(var('T')),
            Token::Var(var('a')),
        ]
    );
}

#[test]
fn test_keywords_after_overline() {
    assert_eq!(
        tokenize("x\u{0305}AND y"),
        vec![Token::Var(var('x')), Token::Overline, Token::And, Token::Var(var('y'))]
    );

    assert_eq!(
        tokenize("(x ∧ y)\u{0305}OR z"),
        vec![
            Token::OpenParen,
            Token::Var(var('x')),
            Token::And,
            Token::Var(var('y')),
            Token::CloseParen,
            Token::Overline,
            Token::Or,
            Token::Var(var('z')),
        ]
    );

    assert_eq!(
        variables("(x ∧ y)\u{0305}OR z"),
        [var('x'), var('y'), var('z')].into_iter().collect()
    );
}

#[test]
fn test_unknown_characters() {
    assert_eq!(
        tokenize("x ^ 2"),
        vec![Token::Var(var('x')), Token::Unknown('^'), Token::Unknown('2')]
    );
}

#[test]
fn test_render_source() {
    let tokens = tokenize("(x∨y\u{0305})∧¬x");
    assert_eq!(render(&tokens, Notation::Source), "(x ∨ y\u{0305}) ∧ ¬x");
    assert_eq!(render(&tokens, Notation::Keyword), "(x OR y\u{0305}) AND NOT x");
}

#[test]
fn test_definitions() -> Result<(), ParseError> {
    let def: FunctionDefinition = "f(x,y) = (x ∨ y\u{0305}) ∧ (x ∨ y)".parse()?;
    assert_eq!(def.name, "f(x,y)");
    assert_eq!(def.expression, "(x ∨ y\u{0305}) ∧ (x ∨ y)");
    assert_eq!(def.params(), vec!["x", "y"]);
    assert_eq!(def.variables().into_iter().collect::<Vec<_>>(), vec![var('x'), var('y')]);

    // only the first '=' separates name and expression
    let def: FunctionDefinition = "a = b = c".parse()?;
    assert_eq!(def, FunctionDefinition::new("a", "b = c"));

    let def: FunctionDefinition = "g=1".parse()?;
    assert_eq!(def.params(), Vec::<&str>::new());

    Ok(())
}

#[test]
fn test_definition_errors() {
    assert_eq!(
        "x ∧ y".parse::<FunctionDefinition>(),
        Err(ParseError::MissingEquals("x ∧ y".to_string()))
    );
    assert_eq!(
        " = x".parse::<FunctionDefinition>(),
        Err(ParseError::EmptyName(" = x".to_string()))
    );
    assert_eq!(
        ParseError::MissingEquals("x ∧ y".to_string()).to_string(),
        "missing '=' in definition: x ∧ y"
    );
}

#[test]
fn test_parse_input_skips_invalid_lines() {
    let functions = parse_input("f = x\nnot a definition\n\n   \ng(x) = ¬x\n");

    assert_eq!(
        functions,
        vec![
            FunctionDefinition::new("f", "x"),
            FunctionDefinition::new("g(x)", "¬x"),
        ]
    );
}

#[test]
fn test_collect_variables_sorted() {
    let functions = parse_input("g = z ∧ a\nh = B ∨ a\nk = x AND y");

    assert_eq!(
        collect_variables(&functions),
        vec![var('B'), var('a'), var('x'), var('y'), var('z')]
    );
}

#[test]
fn test_parser_precedence() -> Result<(), ExpressionError> {
    assert_eq!(
        "x ∨ y ∧ z".parse::<Formula>()?,
        Formula::BinaryOp(
            BinaryOperator::Or,
            v('x'),
            Box::new(Formula::BinaryOp(BinaryOperator::And, v('y'), v('z')))
        )
    );

    assert_eq!(
        "¬x ∧ y".parse::<Formula>()?,
        Formula::BinaryOp(BinaryOperator::And, Box::new(Formula::Not(v('x'))), v('y'))
    );

    assert_eq!("((x))".parse::<Formula>()?, Formula::Var(var('x')));

    Ok(())
}

#[test]
fn test_parser_overline() -> Result<(), ExpressionError> {
    let nand = Formula::Not(Box::new(Formula::BinaryOp(
        BinaryOperator::And,
        v('x'),
        v('y'),
    )));

    assert_eq!("(x ∧ y)\u{0305}".parse::<Formula>()?, nand);
    assert_eq!("\u{0305}(x ∧ y)".parse::<Formula>()?, nand);
    assert_eq!(
        "x\u{0305}\u{0305}".parse::<Formula>()?,
        Formula::Not(Box::new(Formula::Not(v('x'))))
    );
    assert_eq!(
        "0\u{0305}".parse::<Formula>()?,
        Formula::Not(Box::new(Formula::False))
    );

    Ok(())
}

#[test]
fn test_parser_errors() {
    let kind = |s: &str| s.parse::<Formula>().map_err(|e| e.kind);

    assert_eq!(kind("(x ∧ y"), Err(ExpressionErrorKind::UnbalancedParentheses));
    assert_eq!(kind("x ∧ y)"), Err(ExpressionErrorKind::UnbalancedParentheses));
    assert_eq!(kind("x ∧"), Err(ExpressionErrorKind::UnexpectedEnd));
    assert_eq!(kind(""), Err(ExpressionErrorKind::UnexpectedEnd));
    assert_eq!(kind("\u{0305}x"), Err(ExpressionErrorKind::StrayOverline));
    assert_eq!(kind("x ^ y"), Err(ExpressionErrorKind::UnknownCharacter('^')));
    assert_eq!(
        kind("x y"),
        Err(ExpressionErrorKind::UnexpectedToken("y".to_string()))
    );
}

#[test]
fn test_syntax_tree_dot() -> anyhow::Result<()> {
    let definition = FunctionDefinition::new("f(x,y)", "x ∧ x̅ ∨ y");
    let tree = SyntaxTree::from_definition(&definition)?;

    // x is shared between both of its occurrences
    assert_eq!(tree.nodes.len(), 5);

    let mut out = Vec::new();
    tree.render_dot(&mut out)?;
    let dot = String::from_utf8(out)?;

    assert!(dot.starts_with("digraph tree_f_x_y_"));
    assert!(dot.contains("Var x"));
    assert!(dot.contains("Not"));

    Ok(())
}
