//! Regenerate C source from a pycparser-style JSON AST.
//!
//! Covered node kinds: `FileAST`, `Decl`/`Typedef`, `FuncDef`, the declarator
//! chain (`TypeDecl`, `IdentifierType`, `PtrDecl`, `Typename`, `FuncDecl`,
//! `ArrayDecl`), statements (`Compound`, `Return`, `If`, `While`, `For`,
//! `Break`, `Continue`) and expressions (`FuncCall`, `Assignment`,
//! `BinaryOp`, `UnaryOp`, `ID`, `Constant`, `ArrayRef`). Any other node is
//! replaced by the code of its children. Blocks indent by four spaces.
use crate::document::{AstNode, DeclNode, NodeTag};
use crate::ir::UNKNOWN;

const INDENT: &str = "    ";

/// Accumulates the C rendering of one or more documents.
#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self { Self::default() }

    pub fn emit<N: AstNode + ?Sized>(&mut self, node: &N) {
        self.out.push_str(&translation_unit(node));
        if !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Emit a `/* label */` line ahead of the next document.
    pub fn banner(&mut self, label: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(&format!("/* {label} */\n"));
    }

    pub fn into_string(self) -> String { self.out }
}

/// C source for a whole document (or any sub-tree of one).
pub fn generate_c<N: AstNode + ?Sized>(node: &N) -> String {
    let mut cg = Codegen::new();
    cg.emit(node);
    cg.into_string()
}

// ------------------------------ External --------------------------------- //

fn translation_unit<N: AstNode + ?Sized>(node: &N) -> String {
    let ext = match node.node_type() {
        Some("FileAST") => node.field("ext"),
        _ if node.is_array() => Some(node),
        _ => return external(node),
    };
    ext.map(|ext| ext.elements().map(external).collect::<Vec<_>>().join("\n\n"))
        .unwrap_or_default()
}

fn external<N: AstNode + ?Sized>(node: &N) -> String {
    match node.node_type() {
        Some("FuncDef") => function_definition(node),
        _ => statement(node, 0),
    }
}

fn function_definition<N: AstNode + ?Sized>(node: &N) -> String {
    let signature = present(node, "decl")
        .map(|decl| declaration(decl, 0, false))
        .unwrap_or_else(|| format!("{UNKNOWN} {UNKNOWN}(void)"));
    match present(node, "body") {
        Some(body) => format!("{signature} {}", block(body, 0)),
        None => format!("{signature};"),
    }
}

// ----------------------------- Declarations ------------------------------ //

/// `static const char *name = init`, followed by `;` when `terminated`.
fn declaration<N: AstNode + ?Sized>(node: &N, level: usize, terminated: bool) -> String {
    let name = node.str_field("name");
    let mut code = if node.node_type() == Some("Typedef") {
        format!("typedef {}", declarator(node.field("type"), name))
    } else {
        let mut prefix = words(node.field("storage"));
        prefix.extend(words(node.field("funcspec")));
        prefix.push(declarator(node.field("type"), name));
        prefix.join(" ")
    };
    if let Some(init) = present(node, "init") {
        code.push_str(" = ");
        code.push_str(&expr(init));
    }
    if terminated {
        format!("{}{code};", indent(level))
    } else {
        code
    }
}

fn declarator<N: AstNode + ?Sized>(ty: Option<&N>, name: Option<&str>) -> String {
    render_declarator(ty, name, 0, false)
}

/// Walk a declarator chain, collecting pointer stars until the declared
/// name is reached. `anonymous` drops the name (casts, function-pointer
/// return types).
fn render_declarator<N: AstNode + ?Sized>(
    ty: Option<&N>,
    name: Option<&str>,
    stars: usize,
    anonymous: bool,
) -> String {
    let Some(node) = ty.filter(|n| n.tag() != NodeTag::Null) else {
        return with_name(UNKNOWN.to_string(), stars, if anonymous { None } else { name });
    };
    match DeclNode::classify(node) {
        Some(DeclNode::PtrDecl) => render_declarator(node.field("type"), name, stars + 1, anonymous),
        Some(DeclNode::Typename) => {
            let name = name.or_else(|| node.str_field("name"));
            render_declarator(node.field("type"), name, stars, anonymous)
        }
        Some(DeclNode::TypeDecl) => {
            let declname = if anonymous { None } else { node.str_field("declname").or(name) };
            let mut specifiers = words(node.field("quals"));
            specifiers.push(type_specifier(node.field("type")));
            with_name(specifiers.join(" "), stars, declname)
        }
        Some(DeclNode::FuncDecl) => {
            let params = parameter_list(present(node, "args"));
            if stars == 0 {
                format!("{}({params})", render_declarator(node.field("type"), name, 0, anonymous))
            } else {
                let ret = render_declarator(node.field("type"), None, 0, true);
                let fname = if anonymous { None } else { find_declname(node).or(name) };
                format!("{ret} ({}{})({params})", "*".repeat(stars), fname.unwrap_or_default())
            }
        }
        Some(DeclNode::Other(kind)) if kind == "ArrayDecl" => {
            let dim = present(node, "dim").map(expr).unwrap_or_default();
            format!("{}[{dim}]", render_declarator(node.field("type"), name, stars, anonymous))
        }
        _ => with_name(type_specifier(Some(node)), stars, if anonymous { None } else { name }),
    }
}

fn with_name(mut base: String, stars: usize, name: Option<&str>) -> String {
    if stars > 0 || name.is_some() {
        base.push(' ');
    }
    base.push_str(&"*".repeat(stars));
    base.push_str(name.unwrap_or_default());
    base
}

fn type_specifier<N: AstNode + ?Sized>(node: Option<&N>) -> String {
    let Some(node) = node else { return UNKNOWN.to_string() };
    match node.node_type() {
        Some("IdentifierType") => words(node.field("names")).join(" "),
        Some(kind @ ("Struct" | "Union" | "Enum")) => {
            let tag = kind.to_lowercase();
            match node.str_field("name") {
                Some(name) => format!("{tag} {name}"),
                None => tag,
            }
        }
        _ => expr(node),
    }
}

/// `(int argc, char **argv)` contents; `void` when there is nothing to list.
fn parameter_list<N: AstNode + ?Sized>(args: Option<&N>) -> String {
    let params: Vec<String> = args
        .and_then(|args| args.field("params"))
        .map(|params| params.elements().map(parameter).collect())
        .unwrap_or_default();
    if params.is_empty() { "void".to_string() } else { params.join(", ") }
}

fn parameter<N: AstNode + ?Sized>(param: &N) -> String {
    match param.node_type() {
        Some("Decl") => declaration(param, 0, false),
        Some("Typename") => render_declarator(Some(param), None, 0, false),
        Some("EllipsisParam") => "...".to_string(),
        _ => expr(param),
    }
}

/// First `declname` down the `type` chain.
fn find_declname<N: AstNode + ?Sized>(node: &N) -> Option<&str> {
    match node.str_field("declname").filter(|n| !n.is_empty()) {
        Some(name) => Some(name),
        None => node.field("type").and_then(find_declname),
    }
}

// ------------------------------ Statements ------------------------------- //

fn block<N: AstNode + ?Sized>(node: &N, level: usize) -> String {
    let items: Vec<String> = present(node, "block_items")
        .map(|items| {
            items
                .elements()
                .map(|item| statement(item, level + 1))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if items.is_empty() {
        format!("{{\n{}}}", indent(level))
    } else {
        format!("{{\n{}\n{}}}", items.join("\n"), indent(level))
    }
}

fn statement<N: AstNode + ?Sized>(node: &N, level: usize) -> String {
    let pad = indent(level);
    match node.node_type() {
        Some("Compound") => format!("{pad}{}", block(node, level)),
        Some("Decl" | "Typedef") => declaration(node, level, true),
        Some("FuncDef") => function_definition(node),
        Some("Return") => match present(node, "expr") {
            Some(e) => format!("{pad}return {};", expr(e)),
            None => format!("{pad}return;"),
        },
        Some("If") => format!("{pad}{}", if_chain(node, level)),
        Some("While") => format!(
            "{pad}while ({}){}",
            condition(present(node, "cond")),
            body(present(node, "stmt"), level)
        ),
        Some("For") => format!(
            "{pad}for ({}; {}; {}){}",
            present(node, "init").map(for_init).unwrap_or_default(),
            present(node, "cond").map(|c| condition(Some(c))).unwrap_or_default(),
            present(node, "next").map(expr).unwrap_or_default(),
            body(present(node, "stmt"), level)
        ),
        Some("Break") => format!("{pad}break;"),
        Some("Continue") => format!("{pad}continue;"),
        Some("EmptyStatement") => format!("{pad};"),
        _ => {
            let code = expr(node);
            if code.is_empty() { code } else { format!("{pad}{code};") }
        }
    }
}

fn if_chain<N: AstNode + ?Sized>(node: &N, level: usize) -> String {
    let iftrue = present(node, "iftrue");
    let mut code = format!("if ({}){}", condition(present(node, "cond")), body(iftrue, level));
    if let Some(iffalse) = present(node, "iffalse") {
        let braced = iftrue.is_some_and(|t| t.node_type() == Some("Compound"));
        code.push_str(&if braced { " ".to_string() } else { format!("\n{}", indent(level)) });
        code.push_str("else");
        if iffalse.node_type() == Some("If") {
            code.push(' ');
            code.push_str(&if_chain(iffalse, level));
        } else {
            code.push_str(&body(Some(iffalse), level));
        }
    }
    code
}

/// Branch or loop body: braces stay on the header line, a single
/// statement moves to the next line one level deeper.
fn body<N: AstNode + ?Sized>(stmt: Option<&N>, level: usize) -> String {
    match stmt {
        Some(s) if s.node_type() == Some("Compound") => format!(" {}", block(s, level)),
        Some(s) => format!("\n{}", statement(s, level + 1)),
        None => ";".to_string(),
    }
}

fn for_init<N: AstNode + ?Sized>(init: &N) -> String {
    match init.node_type() {
        Some("DeclList") => present(init, "decls")
            .map(|decls| decls.elements().map(|d| declaration(d, 0, false)).collect::<Vec<_>>().join(", "))
            .unwrap_or_default(),
        _ => expr(init),
    }
}

// ------------------------------ Expressions ------------------------------ //

/// Conditions already sit in parentheses, so a top-level binary operation
/// drops its own.
fn condition<N: AstNode + ?Sized>(node: Option<&N>) -> String {
    match node {
        Some(n) if n.node_type() == Some("BinaryOp") => binary(n),
        Some(n) => expr(n),
        None => String::new(),
    }
}

fn binary<N: AstNode + ?Sized>(node: &N) -> String {
    format!(
        "{} {} {}",
        operand(node, "left"),
        node.str_field("op").unwrap_or_default(),
        operand(node, "right")
    )
}

fn operand<N: AstNode + ?Sized>(node: &N, key: &str) -> String {
    present(node, key).map(expr).unwrap_or_default()
}

fn expr<N: AstNode + ?Sized>(node: &N) -> String {
    match node.tag() {
        NodeTag::Object => {}
        NodeTag::Array => return node.elements().map(expr).collect::<Vec<_>>().join("\n"),
        _ => return node.as_str().unwrap_or_default().to_string(),
    }
    match node.node_type() {
        Some("ID") => node.str_field("name").unwrap_or_default().to_string(),
        Some("Constant") => node.str_field("value").unwrap_or_default().to_string(),
        Some("BinaryOp") => format!("({})", binary(node)),
        Some("UnaryOp") => {
            let inner = operand(node, "expr");
            match node.str_field("op").unwrap_or_default() {
                "p++" => format!("{inner}++"),
                "p--" => format!("{inner}--"),
                "sizeof" => format!("sizeof({inner})"),
                op => format!("{op}{inner}"),
            }
        }
        Some("Assignment") => format!(
            "{} {} {}",
            operand(node, "lvalue"),
            node.str_field("op").unwrap_or("="),
            operand(node, "rvalue")
        ),
        Some("FuncCall") => {
            let args = present(node, "args")
                .and_then(|args| args.field("exprs"))
                .map(|exprs| exprs.elements().map(expr).collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            format!("{}({args})", operand(node, "name"))
        }
        Some("ArrayRef") => format!("{}[{}]", operand(node, "name"), operand(node, "subscript")),
        Some("ExprList") => present(node, "exprs")
            .map(|exprs| exprs.elements().map(expr).collect::<Vec<_>>().join(", "))
            .unwrap_or_default(),
        Some("Typename") => render_declarator(Some(node), None, 0, true),
        _ => node
            .children()
            .filter(|(_, child)| child.is_object() || child.is_array())
            .map(|(_, child)| expr(child))
            .collect(),
    }
}

// ------------------------------- Helpers --------------------------------- //

fn indent(level: usize) -> String { INDENT.repeat(level) }

/// Field that exists and is not `null`.
fn present<'a, N: AstNode + ?Sized>(node: &'a N, key: &str) -> Option<&'a N> {
    node.field(key).filter(|n| n.tag() != NodeTag::Null)
}

fn words<N: AstNode + ?Sized>(node: Option<&N>) -> Vec<String> {
    node.map(|list| list.elements().filter_map(AstNode::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}
