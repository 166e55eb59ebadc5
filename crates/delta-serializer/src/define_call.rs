//! Editing `__d(...)` module definition calls.

use serde_json::Value;

/// Append `params` as extra arguments to the define call in `code`.
///
/// The params are JSON-encoded and inserted right before the last `)` of the
/// code, so `__d(function() {});` with params `[1, [2]]` becomes
/// `__d(function() {},1,[2]);`. Code without a closing paren gets the params
/// appended at the end.
pub fn add_params_to_define_call(code: &str, params: &[Value]) -> String {
    let index = code.rfind(')').unwrap_or(code.len());
    let encoded: Vec<String> = params.iter().map(Value::to_string).collect();

    let mut out = String::with_capacity(code.len() + encoded.iter().map(|p| p.len() + 1).sum::<usize>());
    out.push_str(&code[..index]);
    for param in &encoded {
        out.push(',');
        out.push_str(param);
    }
    out.push_str(&code[index..]);
    out
}
