use scriptforge::python::parse_module;
use scriptforge::script::ActionKind;
use scriptforge::{Script, extract, generate};

// =========================================================================
// Helpers
// =========================================================================

/// Vocabulary method names called in `source`, in document order.
fn vocabulary_calls(source: &str) -> Vec<String> {
    let module = parse_module(source).expect("source should parse");
    module
        .calls()
        .iter()
        .map(|call| call.method_name())
        .filter(|m| ActionKind::from_method(m).is_some())
        .map(str::to_string)
        .collect()
}

const RECORDED: &str = r##"from playwright.sync_api import Playwright, sync_playwright


def run(playwright: Playwright) -> None:
    browser = playwright.chromium.launch(headless=False)
    context = browser.new_context()
    page = context.new_page()
    page.goto("https://shop.example.com/")
    page.click("text=Sign in")
    page.fill("input[name=\"email\"]", "ada@example.com")
    page.type("#password", "hunter2")
    page.press("#password", "Enter")
    page.wait_for_selector(".account")
    page.hover("nav >> text=Products")
    page.select_option("select#size", "M")
    page.check("#gift")
    page.uncheck("#newsletter")
    page.wait_for_timeout(750)
    page.screenshot(path="checkout.png")

    context.close()
    browser.close()


with sync_playwright() as playwright:
    run(playwright)
"##;

// =========================================================================
// Structure is preserved
// =========================================================================

#[test]
fn roundtrip_preserves_statement_kinds_and_order() {
    let script = extract(RECORDED).expect("extract");
    let regenerated = generate(&script);
    assert_eq!(vocabulary_calls(&regenerated), vocabulary_calls(RECORDED));
}

#[test]
fn roundtrip_restores_literal_values() {
    let script = extract(RECORDED).expect("extract");
    let regenerated = generate(&script);
    for line in [
        r#"    page.goto("https://shop.example.com/")"#,
        r#"    page.fill("input[name=\"email\"]", "ada@example.com")"#,
        r##"    page.type("#password", "hunter2")"##,
        r##"    page.press("#password", "Enter")"##,
        r#"    page.wait_for_timeout(750)"#,
        r#"    page.screenshot(path="checkout.png")"#,
    ] {
        assert!(
            regenerated.lines().any(|l| l == line),
            "missing line {:?} in:\n{}",
            line,
            regenerated
        );
    }
}

#[test]
fn regenerated_program_extracts_to_the_same_script() {
    let first = extract(RECORDED).expect("extract");
    let second = extract(&generate(&first)).expect("extract regenerated");
    assert_eq!(second, first);
}

#[test]
fn roundtrip_through_yaml() {
    let script = extract(RECORDED).expect("extract");
    let yaml = serde_yaml::to_string(&script).expect("serialize");
    let loaded: Script = serde_yaml::from_str(&yaml).expect("deserialize");
    assert_eq!(generate(&loaded), generate(&script));
}

#[test]
fn roundtrip_with_special_characters() {
    let source = r##"page.fill("#msg", "she said \"hi\" \\ bye")
page.click("text=\"Quoted\"")
"##;
    let script = extract(source).expect("extract");
    let regenerated = generate(&script);
    assert!(regenerated.contains(r##"page.fill("#msg", "she said \"hi\" \\ bye")"##));
    assert!(regenerated.contains(r#"page.click("text=\"Quoted\"")"#));
    assert_eq!(extract(&regenerated).expect("extract"), script);
}

#[test]
fn skipped_calls_do_not_survive_roundtrip() {
    let source = "page.click('#a')\npage.fill('#only')\npage.get_by_text('x').click()\n";
    let regenerated = generate(&extract(source).expect("extract"));
    assert_eq!(vocabulary_calls(&regenerated), vec!["click"]);
}
