//! A small TypeScript source-document builder.
//!
//! Emitters describe a module as imports, declarations and a default export
//! built from [`TsExpr`] trees; [`SourceFile::render`] turns that into text
//! with two-space indentation, one property per line.

const INDENT: &str = "  ";

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Render at nesting depth `level`. The first line is not indented; any
    /// following lines are.
    fn emit_at(&self, level: usize) -> String;

    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

fn pad(level: usize) -> String {
    INDENT.repeat(level)
}

/// A piece of a template literal.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Static(String),
    Dynamic(TsExpr),
}

/// An object literal member.
#[derive(Debug, Clone, PartialEq)]
pub enum TsProp {
    KeyValue(String, TsExpr),
    /// `{ name }`
    Shorthand(String),
    /// `{ ...expr }`
    Spread(TsExpr),
}

/// A binding pattern for parameters and `const` declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Ident(String),
    /// `{ a, b }`
    Object(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Expr(Box<TsExpr>),
    Block(Vec<TsStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    Ident(String),
    Str(String),
    Bool(bool),
    Template(Vec<TemplatePart>),
    Object(Vec<TsProp>),
    Array(Vec<TsExpr>),
    Call {
        callee: Box<TsExpr>,
        args: Vec<TsExpr>,
    },
    Member {
        object: Box<TsExpr>,
        prop: String,
    },
    Arrow {
        is_async: bool,
        params: Vec<Binding>,
        body: ArrowBody,
    },
    Await(Box<TsExpr>),
    /// `left || right`
    Or(Box<TsExpr>, Box<TsExpr>),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    Const { binding: Binding, value: TsExpr },
    Return(TsExpr),
    Expr(TsExpr),
}

impl TsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        TsExpr::Str(value.into())
    }

    /// `callee(args...)`
    pub fn call(callee: impl Into<String>, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(TsExpr::Raw(callee.into())),
            args,
        }
    }

    /// `object.prop`
    pub fn member(self, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(self),
            prop: prop.into(),
        }
    }

    pub fn object(props: impl IntoIterator<Item = (String, TsExpr)>) -> Self {
        TsExpr::Object(
            props
                .into_iter()
                .map(|(key, value)| TsProp::KeyValue(key, value))
                .collect(),
        )
    }

    fn is_simple(&self) -> bool {
        matches!(
            self,
            TsExpr::Ident(_) | TsExpr::Str(_) | TsExpr::Bool(_) | TsExpr::Raw(_)
        ) || matches!(self, TsExpr::Member { object, .. } if object.is_simple())
    }
}

/// Check if a property key can be written without quotes.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Quote a property key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// A double-quoted string literal with JSON escaping.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn emit_list(items: &[String]) -> String {
    items.join(", ")
}

impl Emit for Binding {
    fn emit_at(&self, _level: usize) -> String {
        match self {
            Binding::Ident(name) => name.clone(),
            Binding::Object(names) if names.is_empty() => "{}".to_string(),
            Binding::Object(names) => format!("{{ {} }}", emit_list(names)),
        }
    }
}

impl Emit for TsProp {
    fn emit_at(&self, level: usize) -> String {
        match self {
            TsProp::KeyValue(key, value) => {
                format!("{}: {}", quote_if_needed(key), value.emit_at(level))
            }
            TsProp::Shorthand(name) => name.clone(),
            TsProp::Spread(expr) => format!("...{}", expr.emit_at(level)),
        }
    }
}

impl Emit for TsExpr {
    fn emit_at(&self, level: usize) -> String {
        match self {
            TsExpr::Ident(name) | TsExpr::Raw(name) => name.clone(),
            TsExpr::Str(value) => string_literal(value),
            TsExpr::Bool(value) => value.to_string(),
            TsExpr::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|part| match part {
                        TemplatePart::Static(text) => escape_template(text),
                        TemplatePart::Dynamic(expr) => format!("${{{}}}", expr.emit_at(level)),
                    })
                    .collect();
                format!("`{content}`")
            }
            TsExpr::Object(props) if props.is_empty() => "{}".to_string(),
            TsExpr::Object(props) => {
                let inner = pad(level + 1);
                let mut out = String::from("{\n");
                for prop in props {
                    out.push_str(&format!("{inner}{},\n", prop.emit_at(level + 1)));
                }
                out.push_str(&pad(level));
                out.push('}');
                out
            }
            TsExpr::Array(items) if items.iter().all(TsExpr::is_simple) => {
                let items: Vec<String> = items.iter().map(|i| i.emit_at(level)).collect();
                format!("[{}]", emit_list(&items))
            }
            TsExpr::Array(items) => {
                let inner = pad(level + 1);
                let mut out = String::from("[\n");
                for item in items {
                    out.push_str(&format!("{inner}{},\n", item.emit_at(level + 1)));
                }
                out.push_str(&pad(level));
                out.push(']');
                out
            }
            TsExpr::Call { callee, args } => {
                let args: Vec<String> = args.iter().map(|a| a.emit_at(level)).collect();
                format!("{}({})", callee.emit_at(level), emit_list(&args))
            }
            TsExpr::Member { object, prop } => format!("{}.{prop}", object.emit_at(level)),
            TsExpr::Arrow {
                is_async,
                params,
                body,
            } => {
                let params: Vec<String> = params.iter().map(|p| p.emit_at(level)).collect();
                let prefix = if *is_async { "async " } else { "" };
                let body = match body {
                    ArrowBody::Expr(expr) => expr.emit_at(level),
                    ArrowBody::Block(stmts) => {
                        let mut out = String::from("{\n");
                        for stmt in stmts {
                            out.push_str(&pad(level + 1));
                            out.push_str(&stmt.emit_at(level + 1));
                            out.push('\n');
                        }
                        out.push_str(&pad(level));
                        out.push('}');
                        out
                    }
                };
                format!("{prefix}({}) => {body}", emit_list(&params))
            }
            TsExpr::Await(expr) => format!("await {}", expr.emit_at(level)),
            TsExpr::Or(left, right) => {
                format!("{} || {}", left.emit_at(level), right.emit_at(level))
            }
        }
    }
}

impl Emit for TsStmt {
    fn emit_at(&self, level: usize) -> String {
        match self {
            TsStmt::Const { binding, value } => {
                format!("const {} = {};", binding.emit(), value.emit_at(level))
            }
            TsStmt::Return(expr) => format!("return {};", expr.emit_at(level)),
            TsStmt::Expr(expr) => format!("{};", expr.emit_at(level)),
        }
    }
}

/// `import def, { a, b } from "module";`
#[derive(Debug, Clone, PartialEq)]
pub struct TsImport {
    pub default: Option<String>,
    pub names: Vec<String>,
    pub from: String,
}

impl TsImport {
    pub fn named(names: &[&str], from: &str) -> Self {
        Self {
            default: None,
            names: names.iter().map(|n| n.to_string()).collect(),
            from: from.to_string(),
        }
    }

    pub fn default_import(name: &str, from: &str) -> Self {
        Self {
            default: Some(name.to_string()),
            names: Vec::new(),
            from: from.to_string(),
        }
    }
}

impl Emit for TsImport {
    fn emit_at(&self, _level: usize) -> String {
        let mut clauses = Vec::new();
        if let Some(ref default) = self.default {
            clauses.push(default.clone());
        }
        if !self.names.is_empty() {
            clauses.push(format!("{{ {} }}", emit_list(&self.names)));
        }
        format!(
            "import {} from {};",
            clauses.join(", "),
            string_literal(&self.from)
        )
    }
}

/// A top-level `const` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TsConst {
    pub exported: bool,
    pub name: String,
    pub value: TsExpr,
}

impl Emit for TsConst {
    fn emit_at(&self, level: usize) -> String {
        let export = if self.exported { "export " } else { "" };
        format!("{export}const {} = {};", self.name, self.value.emit_at(level))
    }
}

/// One generated module: imports, then declarations, then a default export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceFile {
    pub imports: Vec<TsImport>,
    pub declarations: Vec<TsConst>,
    pub default_export: Option<TsExpr>,
}

impl SourceFile {
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        if !self.imports.is_empty() {
            let imports: Vec<String> = self.imports.iter().map(Emit::emit).collect();
            sections.push(imports.join("\n"));
        }
        for declaration in &self.declarations {
            sections.push(declaration.emit());
        }
        if let Some(ref export) = self.default_export {
            sections.push(format!("export default {};", export.emit()));
        }

        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }
}
