use scriptforge::error::ScriptForgeError;
use scriptforge::python::ast::{Call, Constant, Expr};
use scriptforge::python::walk::MAX_NESTING;
use scriptforge::python::{SyntaxError, parse_module};

// =========================================================================
// Helpers
// =========================================================================

fn methods(source: &str) -> Vec<String> {
    let module = parse_module(source).expect("source should parse");
    module
        .calls()
        .iter()
        .map(|call| call.method_name().to_string())
        .collect()
}

fn first_call(source: &str) -> Call {
    let module = parse_module(source).expect("source should parse");
    module.calls().first().cloned().expect("at least one call")
}

fn syntax_error(source: &str) -> SyntaxError {
    match parse_module(source) {
        Err(ScriptForgeError::Syntax(err)) => err,
        other => panic!("Expected syntax error for {:?}, got {:?}", source, other),
    }
}

fn str_arg(value: &str) -> Expr {
    Expr::Constant(Constant::Str(value.to_string()))
}

fn nested_click(depth: usize) -> String {
    format!("page.click({}\"#a\"{})\n", "(".repeat(depth), ")".repeat(depth))
}

const CODEGEN_SCRIPT: &str = r#"import re
from playwright.sync_api import Playwright, sync_playwright, expect


def run(playwright: Playwright) -> None:
    browser = playwright.chromium.launch(headless=False)
    context = browser.new_context()
    page = context.new_page()
    page.goto("https://example.com/")
    page.get_by_role("link", name="More information...").click()
    expect(page.get_by_text("Example")).to_be_visible()

    # ---------------------
    context.close()
    browser.close()


with sync_playwright() as playwright:
    run(playwright)
"#;

// =========================================================================
// Calls and arguments
// =========================================================================

#[test]
fn parse_expression_statement_call() {
    let call = first_call("page.goto('https://example.com')\n");
    assert_eq!(call.method_name(), "goto");
    assert_eq!(call.args, vec![str_arg("https://example.com")]);
    assert!(call.keywords.is_empty());
}

#[test]
fn keyword_arguments_are_separated_from_positional() {
    let call = first_call("page.screenshot('ignored', path='out.png', full_page=True)\n");
    assert_eq!(call.args.len(), 1);
    assert_eq!(call.keywords.len(), 2);
    assert_eq!(call.keyword("path"), Some(&str_arg("out.png")));
    assert_eq!(
        call.keyword("full_page"),
        Some(&Expr::Constant(Constant::Bool(true)))
    );
    assert_eq!(call.keyword("missing"), None);
}

#[test]
fn splats_and_comments_in_argument_lists() {
    let call = first_call("page.click(\n    # target\n    *sels,\n    **opts,\n)\n");
    assert_eq!(call.args, vec![Expr::Other("list_splat")]);
    assert!(call.keywords.is_empty());
}

#[test]
fn generator_argument_is_not_a_literal() {
    let call = first_call("page.click(s for s in sels)\n");
    assert_eq!(call.args, vec![Expr::Other("generator_expression")]);
}

#[test]
fn adjacent_strings_concatenate() {
    let call = first_call("page.goto('https://' 'example.com')\n");
    assert_eq!(call.args, vec![str_arg("https://example.com")]);
}

#[test]
fn parenthesized_literal_is_a_constant() {
    let call = first_call("page.click((('#a')))\n");
    assert_eq!(call.args, vec![str_arg("#a")]);
}

#[test]
fn fstring_is_not_a_constant() {
    let call = first_call("page.goto(f'{base}/login')\n");
    assert_eq!(call.args, vec![Expr::FString]);
    let call = first_call("page.goto('https://' f'{host}')\n");
    assert_eq!(call.args, vec![Expr::FString]);
}

#[test]
fn negative_number_is_a_unary_op() {
    let call = first_call("page.wait_for_timeout(-5)\n");
    assert_eq!(call.args, vec![Expr::Other("unary_operator")]);
}

#[test]
fn constants_of_every_kind() {
    let call = first_call("page.f(1_000, 0x1F, 1.5, 2j, None, ..., False, b'ok')\n");
    assert_eq!(
        call.args,
        vec![
            Expr::Constant(Constant::Int(1000)),
            Expr::Constant(Constant::Int(31)),
            Expr::Constant(Constant::Float(1.5)),
            Expr::Constant(Constant::Imaginary("2j".into())),
            Expr::Constant(Constant::None),
            Expr::Constant(Constant::Ellipsis),
            Expr::Constant(Constant::Bool(false)),
            Expr::Constant(Constant::Bytes(b"ok".to_vec())),
        ]
    );
}

#[test]
fn call_position_is_the_method_name() {
    let call = first_call("x = 1\n    \nresult =   page.click('a')\n");
    assert_eq!((call.line, call.column), (3, 17));
}

#[test]
fn chained_call_anchor_is_the_last_attribute() {
    let module = parse_module("page.get_by_role('button').click()\n").expect("parse");
    let calls = module.calls();
    assert_eq!(calls[0].method_name(), "click");
    assert_eq!(calls[0].column, 28);
    assert_eq!(calls[1].method_name(), "get_by_role");
    assert_eq!(calls[1].column, 6);
}

#[test]
fn modern_syntax_parses() {
    let sources = [
        "x = a if b else c\n",
        "x = {**a, 'k': v}\n",
        "x = (y := 10)\n",
        "x = a[1:2, ::3]\n",
        "x: int = 1\n",
        "async def f():\n    await page.click('#a')\n",
        "with (open('a') as f, open('b') as g):\n    pass\n",
        "match cmd:\n    case 'go':\n        page.click('#go')\n    case _:\n        pass\n",
    ];
    for source in sources {
        assert!(parse_module(source).is_ok(), "failed to parse: {}", source);
    }
}

// =========================================================================
// Walk order
// =========================================================================

#[test]
fn walk_visits_method_calls_in_document_order() {
    assert_eq!(
        methods(CODEGEN_SCRIPT),
        vec![
            "launch",
            "new_context",
            "new_page",
            "goto",
            "click",
            "get_by_role",
            "to_be_visible",
            "get_by_text",
            "close",
            "close",
        ]
    );
}

#[test]
fn walk_reaches_nested_blocks() {
    let source = "\
def helper():
    if ready:
        for item in items:
            with page.expect_navigation():
                page.click(item)
    else:
        page.hover('x')
page.goto('end')
";
    assert_eq!(
        methods(source),
        vec!["expect_navigation", "click", "hover", "goto"]
    );
}

#[test]
fn walk_reaches_calls_in_arguments_and_decorators() {
    let source = "\
@app.route('/x')
def view(arg=page.title()):
    return [page.click(s) for s in sels]
";
    assert_eq!(methods(source), vec!["route", "title", "click"]);
}

// =========================================================================
// Nesting depth
// =========================================================================

#[test]
fn nesting_up_to_the_limit_parses() {
    // the argument list's own parenthesis counts as one level
    let call = first_call(&nested_click(MAX_NESTING - 1));
    assert_eq!(call.args, vec![str_arg("#a")]);
}

#[test]
fn nesting_past_the_limit_is_a_syntax_error() {
    let err = syntax_error(&nested_click(MAX_NESTING));
    assert_eq!(err.message, "too many nested parentheses");
    assert_eq!((err.line, err.column), (1, 11 + MAX_NESTING));
}

#[test]
fn very_deep_nesting_is_an_error_not_a_crash() {
    let err = syntax_error(&nested_click(1000));
    assert_eq!(err.message, "too many nested parentheses");

    let lists = format!("x = {}1{}\n", "[".repeat(1000), "]".repeat(1000));
    assert_eq!(syntax_error(&lists).message, "too many nested parentheses");
}

// =========================================================================
// Syntax errors
// =========================================================================

#[test]
fn dangling_operator_is_a_syntax_error() {
    let err = syntax_error("x = 1 +\n");
    assert!(!err.message.is_empty());
}

#[test]
fn unclosed_call_is_a_syntax_error() {
    syntax_error("page.click(\n");
    syntax_error("page.goto('https://a.test'\n");
}

#[test]
fn broken_definition_is_a_syntax_error() {
    syntax_error("def f(:\n    pass\n");
}

#[test]
fn python2_print_is_a_syntax_error() {
    let err = syntax_error("print 'hello'\n");
    assert_eq!(err.message, "Missing parentheses in call to 'print'");
    assert_eq!((err.line, err.column), (1, 1));
}

#[test]
fn syntax_error_display_includes_position() {
    let err = SyntaxError::new("invalid syntax", 4, 2);
    assert_eq!(
        err.to_string(),
        "invalid Python syntax at line 4, column 2: invalid syntax"
    );
    let wrapped: ScriptForgeError = err.into();
    assert!(wrapped.to_string().starts_with("invalid Python syntax at line 4"));
}
