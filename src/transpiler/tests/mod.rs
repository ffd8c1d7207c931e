mod mysql;
mod sqlite;

use crate::eval::evaluate_str;
use crate::transpiler::{ToDdl, Translator};

/// Evaluate a script and render every operation with `translator`.
fn ddl(translator: &dyn Translator, script: &str) -> String {
    evaluate_str(script)
        .unwrap()
        .iter()
        .map(|op| op.to_ddl(translator).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

const USERS: &str = r#"
create_table("users", func(t) {
    t.Column("first_name", "string", {})
    t.Column("last_name", "string", {})
    t.Column("email", "string", {"size": 20})
    t.Column("permissions", "jsonb", {"null": true})
    t.Column("age", "integer", {"null": true, "default": 40})
})
"#;
