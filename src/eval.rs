//! Script evaluation.
//!
//! Walks a parsed [`Script`] in source order, checks every construct's
//! argument shapes and records one [`Operation`] per statement.

use crate::ast::{Call, Expr, Func, LiteralError, Script, Value};
use crate::error::{SchemerError, SchemerResult};
use crate::migrate::{Column, ColumnType, Index, Operation, Options, Table};

/// Top-level constructs understood by the evaluator.
pub const CONSTRUCTS: &[&str] = &[
    "create_table",
    "drop_table",
    "rename_table",
    "add_column",
    "drop_column",
    "rename_column",
    "add_index",
    "drop_index",
    "rename_index",
];

/// Parse and evaluate a script.
pub fn evaluate_str(source: &str) -> SchemerResult<Vec<Operation>> {
    let script = crate::parser::parse(source)?;
    evaluate(&script)
}

/// Evaluate a parsed script into operations, stopping at the first error.
pub fn evaluate(script: &Script) -> SchemerResult<Vec<Operation>> {
    let mut operations = Vec::with_capacity(script.statements.len());
    for (i, stmt) in script.statements.iter().enumerate() {
        let call = match stmt {
            Expr::Call(call) => call,
            other => {
                return Err(SchemerError::dsl(
                    "script",
                    script.lines.get(i).copied().unwrap_or_default(),
                    format!("expected a construct call, found {}", other.shape()),
                ));
            }
        };
        let op = evaluate_call(call)?;
        tracing::debug!(construct = %call.name(), line = call.line, op = op.name(), "evaluated");
        operations.push(op);
    }
    Ok(operations)
}

fn evaluate_call(call: &Call) -> SchemerResult<Operation> {
    let args = Args::new(call);
    match call.callee.as_slice() {
        [name] => match name.as_str() {
            "create_table" => create_table(&args),
            "drop_table" => {
                args.arity(&["table name"], 0)?;
                Ok(Operation::DropTable(Table::new(args.string(0, "table name")?)?))
            }
            "rename_table" => {
                args.arity(&["old table name", "new table name"], 0)?;
                Ok(Operation::RenameTable {
                    tables: vec![
                        Table::new(args.string(0, "old table name")?)?,
                        Table::new(args.string(1, "new table name")?)?,
                    ],
                })
            }
            "add_column" => {
                args.arity(&["table name", "column name", "column type", "options"], 1)?;
                let table = args.string(0, "table name")?;
                crate::migrate::require_identifier("table.name", &table)?;
                let options = args.options(3)?;
                let column = Column::new(
                    args.string(1, "column name")?,
                    &args.string(2, "column type")?,
                    &options,
                )?;
                Ok(Operation::AddColumn { table, column })
            }
            "drop_column" => {
                args.arity(&["table name", "column name"], 0)?;
                let table = args.string(0, "table name")?;
                let column = args.string(1, "column name")?;
                crate::migrate::require_identifier("table.name", &table)?;
                crate::migrate::require_identifier("column.name", &column)?;
                Ok(Operation::DropColumn { table, column })
            }
            "rename_column" => {
                args.arity(&["table name", "old column name", "new column name"], 0)?;
                let table = args.string(0, "table name")?;
                let from = args.string(1, "old column name")?;
                let to = args.string(2, "new column name")?;
                crate::migrate::require_identifier("table.name", &table)?;
                crate::migrate::require_identifier("column.from", &from)?;
                crate::migrate::require_identifier("column.to", &to)?;
                Ok(Operation::RenameColumn { table, from, to })
            }
            "add_index" => {
                args.arity(&["table name", "columns", "options"], 1)?;
                let table = args.string(0, "table name")?;
                let columns = args.columns(1)?;
                let options = args.options(2)?;
                Ok(Operation::AddIndex(Index::new(table, columns, &options)?))
            }
            "drop_index" => {
                args.arity(&["index name"], 0)?;
                let name = args.string(0, "index name")?;
                crate::migrate::require_identifier("index.name", &name)?;
                Ok(Operation::DropIndex { name })
            }
            "rename_index" => {
                args.arity(&["old index name", "new index name"], 0)?;
                let from = args.string(0, "old index name")?;
                let to = args.string(1, "new index name")?;
                crate::migrate::require_identifier("index.from", &from)?;
                crate::migrate::require_identifier("index.to", &to)?;
                Ok(Operation::RenameIndex { from, to })
            }
            other => Err(unknown_construct(call, other)),
        },
        _ => Err(unknown_construct(call, &call.name())),
    }
}

fn unknown_construct(call: &Call, name: &str) -> SchemerError {
    SchemerError::dsl(
        name,
        call.line,
        format!("unknown construct, expected one of: {}", CONSTRUCTS.join(", ")),
    )
}

/// `create_table(name, [options], func(t) { t.Column(...) ... })`
fn create_table(args: &Args<'_>) -> SchemerResult<Operation> {
    let (options, block) = match args.call.args.len() {
        2 => (Options::new(), args.block(1)?),
        3 => (args.options(1)?, args.block(2)?),
        _ => return Err(args.arity_error(&["table name", "options", "block"], 1)),
    };
    let mut table = Table::with_options(args.string(0, "table name")?, options)?;
    let declared = block_columns(args.construct(), block)?;

    if !declared.iter().any(|c| c.name == "id" || c.primary) {
        table.add_column(Column::build("id", ColumnType::Integer).primary_key())?;
    }
    if table.timestamps() {
        for name in ["created_at", "updated_at"] {
            if !declared.iter().any(|c| c.name == name) {
                table.add_column(Column::build(name, ColumnType::Timestamp))?;
            }
        }
    }
    for column in declared {
        table.add_column(column)?;
    }

    Ok(Operation::CreateTable(table))
}

/// Columns declared inside a `create_table` block, in call order.
fn block_columns(construct: &str, block: &Func) -> SchemerResult<Vec<Column>> {
    let param = match block.params.as_slice() {
        [param] => param,
        params => {
            return Err(SchemerError::dsl(
                construct,
                block.line,
                format!("block must take exactly one parameter, got {}", params.len()),
            ));
        }
    };

    let mut columns = Vec::with_capacity(block.body.len());
    for stmt in &block.body {
        let call = match stmt {
            Expr::Call(call) if call.callee.len() == 2 && &call.callee[0] == param => call,
            Expr::Call(call) => {
                return Err(SchemerError::dsl(
                    construct,
                    call.line,
                    format!(
                        "only {}.Column(...) is allowed inside a table block, found {}(...)",
                        param,
                        call.name()
                    ),
                ));
            }
            other => {
                return Err(SchemerError::dsl(
                    construct,
                    block.line,
                    format!(
                        "only {}.Column(...) is allowed inside a table block, found {}",
                        param,
                        other.shape()
                    ),
                ));
            }
        };
        if call.callee[1] != "Column" {
            return Err(SchemerError::dsl(
                construct,
                call.line,
                format!("unknown table builder method '{}'", call.callee[1]),
            ));
        }

        let args = Args::new(call);
        args.arity(&["column name", "column type", "options"], 1)?;
        columns.push(Column::new(
            args.string(0, "column name")?,
            &args.string(1, "column type")?,
            &args.options(2)?,
        )?);
    }
    Ok(columns)
}

/// Shape-checked access to a call's arguments.
struct Args<'a> {
    call: &'a Call,
    construct: String,
}

impl<'a> Args<'a> {
    fn new(call: &'a Call) -> Self {
        Self {
            call,
            construct: call.name(),
        }
    }

    fn construct(&self) -> &str {
        &self.construct
    }

    fn error(&self, message: impl Into<String>) -> SchemerError {
        SchemerError::dsl(self.construct.clone(), self.call.line, message)
    }

    /// Check the argument count; the last `optional` parameters may be omitted.
    fn arity(&self, params: &[&str], optional: usize) -> SchemerResult<()> {
        let max = params.len();
        if (max - optional..=max).contains(&self.call.args.len()) {
            Ok(())
        } else {
            Err(self.arity_error(params, optional))
        }
    }

    fn arity_error(&self, params: &[&str], optional: usize) -> SchemerError {
        let received = self.call.args.len();
        let max = params.len();
        let min = max - optional;
        let expected = if optional == 0 {
            format!("{}", max)
        } else {
            format!("{} to {}", min, max)
        };
        self.error(format!(
            "expected {} arguments ({}), got {}",
            expected,
            params.join(", "),
            received
        ))
    }

    fn mismatch(&self, index: usize, what: &str, expected: &str, found: &str) -> SchemerError {
        self.error(format!(
            "argument {} ({}): expected {}, got {}",
            index + 1,
            what,
            expected,
            found
        ))
    }

    fn string(&self, index: usize, what: &str) -> SchemerResult<String> {
        match self.call.args.get(index) {
            Some(Expr::Literal(Value::String(s))) => Ok(s.clone()),
            Some(other) => Err(self.mismatch(index, what, "string", other.shape())),
            None => Err(self.mismatch(index, what, "string", "nothing")),
        }
    }

    /// Optional trailing options object; absent means empty.
    fn options(&self, index: usize) -> SchemerResult<Options> {
        let expr = match self.call.args.get(index) {
            None => return Ok(Options::new()),
            Some(expr @ Expr::Object(_)) => expr,
            Some(other) => return Err(self.mismatch(index, "options", "object", other.shape())),
        };
        match expr.to_value() {
            Ok(Value::Object(map)) => Ok(Options::from(map)),
            Ok(other) => Err(self.mismatch(index, "options", "object", other.shape())),
            Err(e) => Err(self.literal_error(index, "options", e)),
        }
    }

    /// A column name or an array of column names.
    fn columns(&self, index: usize) -> SchemerResult<Vec<String>> {
        let expected = "string or array of strings";
        let value = match self.call.args.get(index) {
            Some(expr) => expr
                .to_value()
                .map_err(|e| self.literal_error(index, "columns", e))?,
            None => return Err(self.mismatch(index, "columns", expected, "nothing")),
        };
        match value {
            Value::String(s) => Ok(vec![s]),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(self.mismatch(index, "columns", expected, other.shape())),
                })
                .collect(),
            other => Err(self.mismatch(index, "columns", expected, other.shape())),
        }
    }

    fn block(&self, index: usize) -> SchemerResult<&'a Func> {
        match self.call.args.get(index) {
            Some(Expr::Func(func)) => Ok(func),
            Some(other) => Err(self.mismatch(index, "block", "block", other.shape())),
            None => Err(self.mismatch(index, "block", "block", "nothing")),
        }
    }

    fn literal_error(&self, index: usize, what: &str, e: LiteralError) -> SchemerError {
        match e {
            LiteralError::NotLiteral(shape) => self.mismatch(index, what, "a literal", shape),
            LiteralError::DuplicateKey(key) => self.error(format!(
                "argument {} ({}): duplicate key '{}'",
                index + 1,
                what,
                key
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_one(src: &str) -> Operation {
        let mut ops = evaluate_str(src).unwrap();
        assert_eq!(ops.len(), 1);
        ops.remove(0)
    }

    fn dsl_message(src: &str) -> String {
        match evaluate_str(src).unwrap_err() {
            SchemerError::Dsl { message, .. } => message,
            other => panic!("expected DSL error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_table_conventions() {
        let op = eval_one(
            r#"create_table("users", func(t) {
                t.Column("email", "string", {"size": 20})
                t.Column("age", "integer", {"null": true, "default": 40})
            })"#,
        );
        let Operation::CreateTable(table) = op else {
            panic!("expected CreateTable");
        };
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "created_at", "updated_at", "email", "age"]);
        assert!(table.columns[0].primary);
        assert_eq!(table.columns[0].col_type, ColumnType::Integer);
        assert!(!table.columns[1].nullable);
        assert_eq!(table.columns[3].size, Some(20));
        assert_eq!(table.columns[4].default, Some(Value::Int(40)));
    }

    #[test]
    fn test_create_table_declared_id_and_no_timestamps() {
        let op = eval_one(
            r#"create_table("users", {"timestamps": false}, func(t) {
                t.Column("id", "uuid", {"primary": true})
                t.Column("name", "text")
            })"#,
        );
        let Operation::CreateTable(table) = op else {
            panic!("expected CreateTable");
        };
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name"]);
        assert_eq!(table.columns[0].col_type, ColumnType::Uuid);
    }

    #[test]
    fn test_declared_timestamp_not_duplicated() {
        let op = eval_one(
            r#"create_table("events", func(t) {
                t.Column("created_at", "timestamptz")
            })"#,
        );
        let Operation::CreateTable(table) = op else {
            panic!("expected CreateTable");
        };
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "updated_at", "created_at"]);
    }

    #[test]
    fn test_simple_constructs() {
        let ops = evaluate_str(
            r#"
            drop_table("users")
            rename_table("users", "people")
            drop_column("people", "age")
            rename_column("people", "name", "full_name")
            drop_index("people_email_idx")
            rename_index("old_ix", "new_ix")
            "#,
        )
        .unwrap();
        let names: Vec<_> = ops.iter().map(Operation::name).collect();
        assert_eq!(
            names,
            [
                "DropTable",
                "RenameTable",
                "DropColumn",
                "RenameColumn",
                "DropIndex",
                "RenameIndex"
            ]
        );
        assert!(matches!(&ops[1], Operation::RenameTable { tables } if tables[1].name == "people"));
    }

    #[test]
    fn test_add_index_accepts_string_or_array() {
        let Operation::AddIndex(idx) = eval_one(r#"add_index("t", "c")"#) else {
            panic!("expected AddIndex");
        };
        assert_eq!(idx.columns, ["c"]);
        assert_eq!(idx.name, "t_c_idx");

        let Operation::AddIndex(idx) =
            eval_one(r#"add_index("t", ["a", "b"], {"unique": true, "name": "ab"})"#)
        else {
            panic!("expected AddIndex");
        };
        assert_eq!(idx.columns, ["a", "b"]);
        assert!(idx.unique);
        assert_eq!(idx.name, "ab");
    }

    #[test]
    fn test_add_column() {
        let op = eval_one(r#"add_column("mytable", "mycolumn", "string", {"default": "foo", "size": 50})"#);
        let Operation::AddColumn { table, column } = op else {
            panic!("expected AddColumn");
        };
        assert_eq!(table, "mytable");
        assert_eq!(column.size, Some(50));
        assert_eq!(column.default, Some(Value::from("foo")));
    }

    #[test]
    fn test_unknown_construct() {
        let err = evaluate_str("\n\ntruncate(\"users\")").unwrap_err();
        match err {
            SchemerError::Dsl {
                construct, line, ..
            } => {
                assert_eq!(construct, "truncate");
                assert_eq!(line, 3);
            }
            other => panic!("expected DSL error, got {other:?}"),
        }
    }

    #[test]
    fn test_shape_mismatch() {
        assert_eq!(
            dsl_message("drop_table(42)"),
            "argument 1 (table name): expected string, got number"
        );
        assert_eq!(
            dsl_message("drop_column(\"t\")"),
            "expected 2 arguments (table name, column name), got 1"
        );
        assert_eq!(
            dsl_message("add_index(\"t\", \"c\", \"unique\")"),
            "argument 3 (options): expected object, got string"
        );
        assert_eq!(
            dsl_message("add_index(\"t\", [\"a\", 1])"),
            "argument 2 (columns): expected string or array of strings, got number"
        );
        assert_eq!(
            dsl_message("drop_table(users)"),
            "argument 1 (table name): expected string, got identifier"
        );
    }

    #[test]
    fn test_duplicate_option_key() {
        assert_eq!(
            dsl_message(r#"add_index("t", "c", {"unique": true, "unique": false})"#),
            "argument 3 (options): duplicate key 'unique'"
        );
    }

    #[test]
    fn test_block_rules() {
        assert!(dsl_message(r#"create_table("t", func(a, b) {})"#).contains("exactly one parameter"));
        assert!(
            dsl_message(r#"create_table("t", func(t) { drop_table("x") })"#)
                .contains("only t.Column(...) is allowed")
        );
        assert!(
            dsl_message(r#"create_table("t", func(t) { t.Index("x") })"#)
                .contains("unknown table builder method 'Index'")
        );
        assert!(
            dsl_message(r#"create_table("t", func(t) { "x" })"#).contains("found string")
        );
        assert_eq!(
            dsl_message(r#"create_table("t")"#),
            "expected 2 to 3 arguments (table name, options, block), got 1"
        );
    }

    #[test]
    fn test_statement_must_be_call() {
        let err = evaluate_str("drop_table(\"a\")\n\"users\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "DSL error in script (line 2): expected a construct call, found string"
        );
    }

    #[test]
    fn test_validation_errors_propagate() {
        let err = evaluate_str(r#"add_column("t", "c", "geometry")"#).unwrap_err();
        assert!(matches!(err, SchemerError::Validation { .. }));

        let err = evaluate_str(r#"create_table("t", func(t) { t.Column("a", "text") t.Column("a", "text") })"#)
            .unwrap_err();
        assert!(matches!(err, SchemerError::Validation { field, .. } if field == "t.a"));
    }

    #[test]
    fn test_stops_at_first_error() {
        let err = evaluate_str("drop_table(\"a\")\ndrop_table(1)\ndrop_table(\"b\")").unwrap_err();
        assert!(matches!(err, SchemerError::Dsl { line: 2, .. }));
    }

    #[test]
    fn test_declared_primary_key_replaces_implicit_id() {
        let op = eval_one(
            r#"create_table("t", {"timestamps": false}, func(t) {
                t.Column("code", "integer", {"primary": true})
            })"#,
        );
        let Operation::CreateTable(table) = op else {
            panic!("expected CreateTable");
        };
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["code"]);
    }

    #[test]
    fn test_two_primary_keys_rejected() {
        let err = evaluate_str(
            r#"create_table("t", func(t) {
                t.Column("a", "uuid", {"primary": true})
                t.Column("b", "uuid", {"primary": true})
            })"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemerError::Validation { ref field, .. } if field == "t"));

        let err = evaluate_str(
            r#"create_table("t", func(t) {
                t.Column("id", "integer", {"primary": true})
                t.Column("code", "string", {"primary": true})
            })"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemerError::Validation { ref field, .. } if field == "t"));
    }

    #[test]
    fn test_add_index_without_columns() {
        let err = evaluate_str(r#"add_index("t", [], {})"#).unwrap_err();
        assert!(
            matches!(err, SchemerError::Validation { ref field, .. } if field == "index.columns")
        );
    }

    #[test]
    fn test_contradictory_defaults_rejected() {
        let err = evaluate_str(r#"add_column("t", "id", "integer", {"primary": true, "default": 5})"#)
            .unwrap_err();
        assert!(matches!(err, SchemerError::Validation { ref field, .. } if field == "id.default"));

        let err = evaluate_str(r#"add_column("t", "c", "text", {"default": null})"#).unwrap_err();
        assert!(matches!(err, SchemerError::Validation { ref field, .. } if field == "c.default"));
    }
}
