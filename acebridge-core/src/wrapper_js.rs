//! Runs the bundled wrapper script in a real JavaScript engine against a
//! minimal Ace stand-in, driving it with the snippets the bridge renders.

use boa_engine::{Context, JsResult, JsValue, Source};
use serde_json::{json, Value};

use crate::assets::WRAPPER_JS;
use crate::mode::HighlightMode;
use crate::protocol::ScriptCall;
use crate::value::ScriptValue;

const ACE_STUB: &str = include_str!("../web/testdata/ace_stub.js");

struct Page {
    context: Context,
}

impl Page {
    fn new() -> Self {
        let mut context = Context::default();
        context
            .eval(Source::from_bytes(ACE_STUB))
            .expect("ace stub evaluates");
        context
            .eval(Source::from_bytes(WRAPPER_JS))
            .expect("wrapper evaluates");
        Page { context }
    }

    fn try_eval(&mut self, script: &str) -> JsResult<JsValue> {
        self.context.eval(Source::from_bytes(script))
    }

    fn eval_json(&mut self, script: &str) -> Value {
        let value = self
            .try_eval(script)
            .unwrap_or_else(|e| panic!("{} threw: {}", script, e));
        if value.is_undefined() {
            return Value::Null;
        }
        value.to_json(&mut self.context).expect("result converts to JSON")
    }

    fn call(&mut self, function: &str, args: Vec<Value>) -> ScriptValue {
        let snippet = ScriptCall::new(function, args).to_snippet().unwrap();
        ScriptValue::from_json(self.eval_json(&snippet))
    }

    fn property(&mut self, name: &str) -> ScriptValue {
        let snippet = ScriptCall::property(name).to_snippet().unwrap();
        ScriptValue::from_json(self.eval_json(&snippet))
    }

    /// Let queued promise reactions (the coalesced user-edit flush) run.
    fn settle(&mut self) {
        self.context.run_jobs();
    }

    fn take_hooks(&mut self) -> Vec<Value> {
        match self.eval_json("aceStub.takeHooks()") {
            Value::Array(hooks) => hooks,
            other => panic!("unexpected hook log {}", other),
        }
    }
}

fn text_hook() -> Value {
    json!({ "hook": "text" })
}

fn lines_hook(count: i64) -> Value {
    json!({ "hook": "lines", "count": count })
}

#[test]
fn set_text_notifies_once_per_call() {
    let mut page = Page::new();
    page.call("setText", vec![json!("a\nb")]);
    assert_eq!(page.take_hooks(), vec![text_hook(), lines_hook(2)]);

    page.call("setText", vec![json!("c\nd")]);
    assert_eq!(page.take_hooks(), vec![text_hook()]);
    assert!(!page.eval_json("aceStub.selected()").as_bool().unwrap());
}

#[test]
fn set_text_on_empty_document_with_empty_text_still_notifies() {
    let mut page = Page::new();
    page.call("setText", vec![json!("")]);
    page.settle();
    assert_eq!(page.take_hooks(), vec![text_hook()]);
}

#[test]
fn replacing_a_selection_is_one_notification() {
    let mut page = Page::new();
    page.call("setText", vec![json!("hello world")]);
    page.take_hooks();

    page.eval_json("aceStub.userReplace(6, 11, 'X')");
    page.settle();

    assert_eq!(page.take_hooks(), vec![text_hook()]);
    assert_eq!(page.property("text"), ScriptValue::Str("hello X".into()));
}

#[test]
fn separate_turns_notify_separately() {
    let mut page = Page::new();
    page.eval_json("aceStub.userAppend('a')");
    page.settle();
    page.eval_json("aceStub.userAppend('b')");
    page.settle();
    assert_eq!(page.take_hooks(), vec![text_hook(), text_hook()]);
}

#[test]
fn growing_from_ten_to_fifteen_lines_reports_fifteen() {
    let mut page = Page::new();
    page.call("setText", vec![json!(vec!["x"; 10].join("\n"))]);
    page.take_hooks();

    page.eval_json(&format!("aceStub.userAppend({})", json!("\ny".repeat(5))));
    page.settle();

    assert_eq!(page.take_hooks(), vec![text_hook(), lines_hook(15)]);
    assert_eq!(page.property("lines"), ScriptValue::Int(15));
}

#[test]
fn read_only_sets_property_and_edit_lock() {
    let mut page = Page::new();
    assert_eq!(page.property("readonly"), ScriptValue::Bool(false));
    for flag in [true, true, false, false] {
        page.call("setReadOnly", vec![json!(flag)]);
        assert_eq!(page.property("readonly"), ScriptValue::Bool(flag));
        assert_eq!(page.eval_json("aceStub.editLock()"), json!(flag));
    }
}

#[test]
fn read_only_ignores_user_edits() {
    let mut page = Page::new();
    page.call("setText", vec![json!("locked")]);
    page.call("setReadOnly", vec![json!(true)]);
    page.take_hooks();

    page.eval_json("aceStub.userAppend('!')");
    page.settle();

    assert!(page.take_hooks().is_empty());
    assert_eq!(page.property("text"), ScriptValue::Str("locked".into()));
}

#[test]
fn rendered_snippets_round_trip_text() {
    let mut page = Page::new();
    let samples = [
        "",
        "it's",
        "say \"hi\"",
        "back\\slash",
        "two\nlines",
        "crlf\r\n",
        "tab\t",
        "')",
        "\");alert(1);//",
        "${x}`",
        "</script>",
        "sep\u{2028}par\u{2029}",
        "é漢🙂",
        "\\'\\\"",
    ];
    for text in samples {
        page.call("setText", vec![json!(text)]);
        assert_eq!(
            page.property("text"),
            ScriptValue::Str(text.to_string()),
            "round trip of {:?}",
            text
        );
    }
}

#[test]
fn mode_and_theme_load_assets_and_report_ids() {
    let mut page = Page::new();
    for mode in HighlightMode::ALL {
        page.call(
            "setMode",
            vec![json!(mode.id()), json!(format!("file:///ace/{}", mode.asset()))],
        );
        assert_eq!(page.property("mode"), ScriptValue::Str(mode.id().into()));
    }
    assert_eq!(page.eval_json("aceStub.mode()"), json!("ace/mode/xml"));

    page.call("setTheme", vec![json!("monokai"), json!("file:///ace/theme-monokai.js")]);
    assert_eq!(page.property("theme"), ScriptValue::Str("monokai".into()));

    let scripts = page.eval_json("aceStub.scripts()");
    assert_eq!(scripts.as_array().unwrap().len(), HighlightMode::ALL.len() + 1);
    assert_eq!(scripts[0], json!("file:///ace/mode-c_cpp.js"));
}

#[test]
fn goto_line_clamps_into_document() {
    let mut page = Page::new();
    page.call("setText", vec![json!("1\n2\n3\n4")]);
    page.call("gotoLine", vec![json!(2)]);
    assert_eq!(page.property("cursorLine"), ScriptValue::Int(2));
    page.call("gotoLine", vec![json!(1000)]);
    assert_eq!(page.property("cursorLine"), ScriptValue::Int(4));
}

#[test]
fn generic_properties_store_and_return() {
    let mut page = Page::new();
    assert_eq!(page.call("property", vec![json!("answer"), json!(42)]), ScriptValue::Int(42));
    assert_eq!(page.property("answer"), ScriptValue::Int(42));
    assert_eq!(page.property("missing"), ScriptValue::None);
    assert_eq!(page.call("ping", vec![]), ScriptValue::Bool(true));
}

#[test]
fn unknown_function_throws() {
    let mut page = Page::new();
    let snippet = ScriptCall::new("explode", vec![]).to_snippet().unwrap();
    assert!(page.try_eval(&snippet).is_err());
}
