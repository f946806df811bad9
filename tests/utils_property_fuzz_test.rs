use page_dom::{
    DYNAMIC_CONTENT_ID, EMPTY_INPUT_MESSAGE, ERROR_MESSAGE_ID, HIDDEN_CLASS, Page, USER_FORM_ID,
    USER_INPUT_ID, add_element_to_dom, handle_form_submit, remove_element_from_dom,
    simulate_click,
};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};

const UTILS_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/utils_property_fuzz_test.txt";
const DEFAULT_UTILS_PROPTEST_CASES: u32 = 256;

const FIXTURE_HTML: &str = r#"
<button id="simulate-click">Simulate Click</button>
<div id="dynamic-content"></div>
<div id="error-message" class="hidden"></div>
<form id="user-form" action="/submit">
  <input type="text" id="user-input">
  <button type="submit">Submit</button>
</form>
"#;

fn utils_proptest_cases() -> u32 {
    std::env::var("PAGE_DOM_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_UTILS_PROPTEST_CASES)
}

fn content_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('b'),
            Just('z'),
            Just('A'),
            Just('0'),
            Just('9'),
            Just(' '),
            Just('\t'),
            Just('\n'),
            Just('-'),
            Just('_'),
            Just('!'),
            Just('é'),
            Just('あ'),
        ],
        0..=24,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn absent_id_strategy() -> BoxedStrategy<String> {
    "[a-z][a-z0-9-]{0,11}"
        .prop_filter("must not collide with a fixture id", |id| {
            !matches!(
                id.as_str(),
                "simulate-click" | "dynamic-content" | "error-message" | "user-form" | "user-input"
            )
        })
        .boxed()
}

fn page() -> std::result::Result<Page, proptest::test_runner::TestCaseError> {
    Page::from_html(FIXTURE_HTML)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))
}

fn assert_add_sets_exact_text(content: &str) -> TestCaseResult {
    let mut page = page()?;
    add_element_to_dom(page.document_mut(), DYNAMIC_CONTENT_ID, content);
    let text = page
        .text(DYNAMIC_CONTENT_ID)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
    prop_assert_eq!(text, content);
    prop_assert!(page.take_diagnostics().is_empty());
    Ok(())
}

fn assert_absent_target_is_a_reported_no_op(id: &str, content: &str) -> TestCaseResult {
    let mut page = page()?;
    let before = page.dump_dom();

    add_element_to_dom(page.document_mut(), id, content);
    prop_assert_eq!(page.dump_dom(), before.clone());

    remove_element_from_dom(page.document_mut(), id);
    prop_assert_eq!(page.dump_dom(), before);

    let diagnostics = page.take_diagnostics();
    prop_assert_eq!(diagnostics.len(), 2);
    prop_assert!(diagnostics.iter().all(|line| line.contains(id)));
    Ok(())
}

fn assert_simulate_click_is_add_element_to_dom(target: &str, message: &str) -> TestCaseResult {
    let mut clicked = page()?;
    let mut added = page()?;

    simulate_click(clicked.document_mut(), target, message);
    add_element_to_dom(added.document_mut(), target, message);

    prop_assert_eq!(clicked.dump_dom(), added.dump_dom());
    prop_assert_eq!(clicked.take_diagnostics(), added.take_diagnostics());
    Ok(())
}

fn assert_submit_validation_dichotomy(value: &str) -> TestCaseResult {
    let mut page = page()?;
    add_element_to_dom(page.document_mut(), DYNAMIC_CONTENT_ID, "seed");
    let input = page
        .document()
        .by_id(USER_INPUT_ID)
        .expect("fixture input");
    page.document_mut()
        .set_value(input, value)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;

    handle_form_submit(page.document_mut(), USER_FORM_ID, DYNAMIC_CONTENT_ID);

    let target_text = page
        .text(DYNAMIC_CONTENT_ID)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
    let error_hidden = page
        .has_class(ERROR_MESSAGE_ID, HIDDEN_CLASS)
        .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;

    if value.trim().is_empty() {
        let error_text = page
            .text(ERROR_MESSAGE_ID)
            .map_err(|err| proptest::test_runner::TestCaseError::fail(format!("{err:?}")))?;
        prop_assert_eq!(error_text, EMPTY_INPUT_MESSAGE);
        prop_assert!(!error_hidden, "error element must be visible");
        prop_assert_eq!(target_text, "seed");
    } else {
        prop_assert!(error_hidden, "error element must be re-hidden");
        prop_assert_eq!(target_text, value);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: utils_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(UTILS_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn add_element_to_dom_sets_exact_text(content in content_strategy()) {
        assert_add_sets_exact_text(&content)?;
    }

    #[test]
    fn absent_targets_leave_the_document_unchanged(
        id in absent_id_strategy(),
        content in content_strategy(),
    ) {
        assert_absent_target_is_a_reported_no_op(&id, &content)?;
    }

    #[test]
    fn simulate_click_is_observationally_add_element_to_dom(
        present in any::<bool>(),
        absent_id in absent_id_strategy(),
        message in content_strategy(),
    ) {
        let target = if present {
            DYNAMIC_CONTENT_ID.to_string()
        } else {
            absent_id
        };
        assert_simulate_click_is_add_element_to_dom(&target, &message)?;
    }

    #[test]
    fn form_submit_validates_or_writes(value in content_strategy()) {
        assert_submit_validation_dichotomy(&value)?;
    }
}
