//! The AST contract (component B): a read-only view over whatever a CIL
//! parser produced, plus the one in-memory implementation the rest of the
//! workspace builds and tests against.
//!
//! The core never mutates an AST and never requires it to be reclaimable
//! before a diff is printed (`spec.md` §6.1) — [`AstNode`] only exposes
//! shared references.

use crate::hash::Hash32;

/// The kind tag every AST node carries. `spec.md` §6.1 describes a closed
/// set of roughly 80 values; this enum gives concrete shape to the subset
/// this workspace specializes (declarations, rule statements, containers,
/// conditionals, ordered lists, nested anonymous payloads, net-context
/// labeling statements). [`Flavor::Other`] stands in for the remainder —
/// every dispatch table in `data_hash`/`cildiff-compare` has a fallback arm
/// for it, so extending this enum with a new concrete variant is additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flavor {
    // Transparent / structural containers.
    Root,
    SourceInfo,
    Block,
    Macro,
    MacroCall,
    Optional,
    In,

    // Conditional containers.
    BooleanIf,
    TunableIf,
    /// Wrapper around a conditional's false-branch rule set.
    CondFalse,
    /// Wrapper around a conditional's true-branch rule set.
    CondTrue,

    // Simple named declarations.
    Boolean,
    Tunable,
    Type,
    TypeAlias,
    TypeAttribute,
    TypeAttributeSet,
    TypeBounds,
    TypePermissive,
    Role,
    RoleAttribute,
    RoleAttributeSet,
    RoleTransition,
    RoleAllow,
    User,
    UserAttribute,
    UserAttributeSet,
    UserRole,
    Category,
    CategoryOrder,
    Sensitivity,
    SensitivityOrder,
    Sid,
    SidOrder,
    SidContext,

    // Class hierarchy.
    Class,
    Common,
    MapClass,
    ClassOrder,
    Permission,

    // Anonymous-payload-capable declarations.
    Context,
    Level,
    LevelRange,

    // Rule statements.
    AllowRule,
    AuditAllowRule,
    DontAuditRule,
    NeverAllowRule,
    TypeTransition,
    TypeChange,
    TypeMember,
    RangeTransition,
    Constrain,
    MlsConstrain,
    ValidateTrans,
    MlsValidateTrans,

    // Labeling statements.
    GenFsCon,
    FsUse,
    NetifCon,
    NodeCon,
    PortCon,
    PirqCon,
    IomemCon,
    IoPortCon,
    PciDeviceCon,
    DeviceTreeCon,

    /// Catch-all for flavors this workspace does not specialize. Carries
    /// the parser's own name for the flavor so it still renders readably.
    Other(&'static str),
}

impl Flavor {
    /// Stable string form, used in logging, JSON output, and as the hash
    /// state's domain-separation tag (every data hasher opens with this).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::SourceInfo => "source-info",
            Self::Block => "block",
            Self::Macro => "macro",
            Self::MacroCall => "call",
            Self::Optional => "optional",
            Self::In => "in",
            Self::BooleanIf => "booleanif",
            Self::TunableIf => "tunableif",
            Self::CondFalse => "condfalse",
            Self::CondTrue => "condtrue",
            Self::Boolean => "boolean",
            Self::Tunable => "tunable",
            Self::Type => "type",
            Self::TypeAlias => "typealias",
            Self::TypeAttribute => "typeattribute",
            Self::TypeAttributeSet => "typeattributeset",
            Self::TypeBounds => "typebounds",
            Self::TypePermissive => "typepermissive",
            Self::Role => "role",
            Self::RoleAttribute => "roleattribute",
            Self::RoleAttributeSet => "roleattributeset",
            Self::RoleTransition => "roletransition",
            Self::RoleAllow => "roleallow",
            Self::User => "user",
            Self::UserAttribute => "userattribute",
            Self::UserAttributeSet => "userattributeset",
            Self::UserRole => "userrole",
            Self::Category => "category",
            Self::CategoryOrder => "categoryorder",
            Self::Sensitivity => "sensitivity",
            Self::SensitivityOrder => "sensitivityorder",
            Self::Sid => "sid",
            Self::SidOrder => "sidorder",
            Self::SidContext => "sidcontext",
            Self::Class => "class",
            Self::Common => "common",
            Self::MapClass => "map_class",
            Self::ClassOrder => "classorder",
            Self::Permission => "perm",
            Self::Context => "context",
            Self::Level => "level",
            Self::LevelRange => "levelrange",
            Self::AllowRule => "allow",
            Self::AuditAllowRule => "auditallow",
            Self::DontAuditRule => "dontaudit",
            Self::NeverAllowRule => "neverallow",
            Self::TypeTransition => "typetransition",
            Self::TypeChange => "typechange",
            Self::TypeMember => "typemember",
            Self::RangeTransition => "rangetransition",
            Self::Constrain => "constrain",
            Self::MlsConstrain => "mlsconstrain",
            Self::ValidateTrans => "validatetrans",
            Self::MlsValidateTrans => "mlsvalidatetrans",
            Self::GenFsCon => "genfscon",
            Self::FsUse => "fsuse",
            Self::NetifCon => "netifcon",
            Self::NodeCon => "nodecon",
            Self::PortCon => "portcon",
            Self::PirqCon => "pirqcon",
            Self::IomemCon => "iomemcon",
            Self::IoPortCon => "ioportcon",
            Self::PciDeviceCon => "pcidevicecon",
            Self::DeviceTreeCon => "devicetreecon",
            Self::Other(name) => name,
        }
    }
}

/// One item of a rule statement's field list: a plain string, an ordered or
/// unordered sub-list of strings, or a nested anonymous payload (a context
/// inline inside a rule, a levelrange inline inside a context, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Str(String),
    List { items: Vec<String>, ordered: bool },
    Nested(Flavor, Box<NodeData>),
}

/// A node in a Boolean-style expression tree: a named reference, or an
/// operator applied to sub-expressions. Used for `booleanif`/`tunableif`
/// conditions and for `constrain`/`mlsconstrain`/`validatetrans` predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Str(String),
    Operator { op: String, operands: Vec<Expr> },
}

impl Expr {
    #[must_use]
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    #[must_use]
    pub fn op(op: impl Into<String>, operands: Vec<Expr>) -> Self {
        Self::Operator {
            op: op.into(),
            operands,
        }
    }
}

/// The opaque per-flavor data payload of `spec.md` §6.1, made concrete. Each
/// variant groups flavors whose "own immediate data fields" take the same
/// shape; `data_hash` matches on `Flavor` to pick the right absorption rule
/// for whatever shape is actually present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Pure structural containers with no fields of their own (`root`,
    /// `source-info`).
    Empty,
    /// A single name: the vast majority of simple declarations and the
    /// name-carrying containers (`block`, `macro`, `optional`, `in`,
    /// `class`, `common`, `map_class`).
    Name(String),
    /// An ordered or unordered list of names (`classorder`, `sidorder`, …
    /// for ordered; raw unordered name sets otherwise).
    NameList { items: Vec<String>, ordered: bool },
    /// A named, unordered member set (`typeattributeset`,
    /// `roleattributeset`, `userattributeset`).
    AttributeSet { name: String, members: Vec<String> },
    /// An ordered field list absorbed position-by-position: the shape of
    /// rule statements and labeling statements (`allow`, `typetransition`,
    /// `genfscon`, `context`, `level`, `levelrange`, …).
    Fields(Vec<Field>),
    /// A standalone Boolean expression (`booleanif`/`tunableif` condition).
    Expr(Expr),
    /// `constrain`/`mlsconstrain`: a class, a permission list, and a
    /// predicate expression.
    ConstrainExpr {
        class: String,
        perms: Vec<String>,
        expr: Expr,
    },
    /// `validatetrans`/`mlsvalidatetrans`: a class and a predicate
    /// expression (no permission list).
    ValidateExpr { class: String, expr: Expr },
    /// `call`: a macro name and its actual arguments.
    MacroCall { name: String, args: Vec<Field> },
}

/// Read-only view a CIL parser's AST must satisfy. Non-owning: a
/// [`CilTree`]/[`CilNode`] is the one concrete implementation shipped here;
/// a real parser would implement this trait over its own arena instead.
pub trait AstNode {
    fn flavor(&self) -> Flavor;
    fn data(&self) -> &NodeData;
    fn first_child(&self) -> Option<&Self>
    where
        Self: Sized;
    fn next_sibling(&self) -> Option<&Self>
    where
        Self: Sized;
    fn line(&self) -> u32;

    /// Iterate direct children via the `first_child`/`next_sibling` chain.
    /// Default method: any `AstNode` implementor gets ergonomic iteration
    /// for free from the two required linked-list primitives.
    fn children(&self) -> ChildIter<'_, Self>
    where
        Self: Sized,
    {
        ChildIter {
            next: self.first_child(),
        }
    }
}

/// Iterator over an [`AstNode`]'s direct children.
pub struct ChildIter<'a, N> {
    next: Option<&'a N>,
}

impl<'a, N: AstNode> Iterator for ChildIter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// One node of the in-memory CIL AST. Children are stored as a classic
/// first-child/next-sibling chain (`spec.md` §6.1's exact shape), each link
/// owned via `Box` — the idiomatic Rust encoding of that linked structure
/// when the tree is owned outright rather than arena-allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CilNode {
    flavor: Flavor,
    data: NodeData,
    line: u32,
    first_child: Option<Box<CilNode>>,
    next_sibling: Option<Box<CilNode>>,
}

impl CilNode {
    /// Construct a leaf node (no children).
    #[must_use]
    pub fn leaf(flavor: Flavor, data: NodeData, line: u32) -> Self {
        Self {
            flavor,
            data,
            line,
            first_child: None,
            next_sibling: None,
        }
    }

    /// Construct a container node, chaining `children` into a
    /// first-child/next-sibling list in the order given.
    #[must_use]
    pub fn container(flavor: Flavor, data: NodeData, line: u32, children: Vec<CilNode>) -> Self {
        Self {
            flavor,
            data,
            line,
            first_child: chain(children),
            next_sibling: None,
        }
    }

    /// A minimal canonical textual rendering, standing in for the external
    /// AST writer named in `spec.md` §6.3. Produces a single-line
    /// s-expression; a production deployment would plug in the real CIL
    /// writer through the same [`AstNode`] contract instead.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_into(self, &mut out);
        out
    }
}

fn chain(mut children: Vec<CilNode>) -> Option<Box<CilNode>> {
    let mut next: Option<Box<CilNode>> = None;
    while let Some(mut child) = children.pop() {
        child.next_sibling = next.take();
        next = Some(Box::new(child));
    }
    next
}

fn render_into(node: &CilNode, out: &mut String) {
    out.push('(');
    out.push_str(node.flavor.as_str());
    render_data(&node.data, out);
    for child in node.children() {
        out.push(' ');
        render_into(child, out);
    }
    out.push(')');
}

fn render_data(data: &NodeData, out: &mut String) {
    match data {
        NodeData::Empty => {}
        NodeData::Name(name) => {
            out.push(' ');
            out.push_str(name);
        }
        NodeData::NameList { items, .. } => {
            for item in items {
                out.push(' ');
                out.push_str(item);
            }
        }
        NodeData::AttributeSet { name, members } => {
            out.push(' ');
            out.push_str(name);
            out.push_str(" (");
            out.push_str(&members.join(" "));
            out.push(')');
        }
        NodeData::Fields(fields) => {
            for field in fields {
                out.push(' ');
                render_field(field, out);
            }
        }
        NodeData::Expr(expr) => {
            out.push(' ');
            render_expr(expr, out);
        }
        NodeData::ConstrainExpr { class, perms, expr } => {
            out.push(' ');
            out.push_str(class);
            out.push_str(" (");
            out.push_str(&perms.join(" "));
            out.push_str(") ");
            render_expr(expr, out);
        }
        NodeData::ValidateExpr { class, expr } => {
            out.push(' ');
            out.push_str(class);
            out.push(' ');
            render_expr(expr, out);
        }
        NodeData::MacroCall { name, args } => {
            out.push(' ');
            out.push_str(name);
            for arg in args {
                out.push(' ');
                render_field(arg, out);
            }
        }
    }
}

fn render_field(field: &Field, out: &mut String) {
    match field {
        Field::Str(s) => out.push_str(s),
        Field::List { items, .. } => {
            out.push('(');
            out.push_str(&items.join(" "));
            out.push(')');
        }
        Field::Nested(flavor, data) => {
            out.push('(');
            out.push_str(flavor.as_str());
            render_data(data, out);
            out.push(')');
        }
    }
}

fn render_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Str(s) => out.push_str(s),
        Expr::Operator { op, operands } => {
            out.push('(');
            out.push_str(op);
            for operand in operands {
                out.push(' ');
                render_expr(operand, out);
            }
            out.push(')');
        }
    }
}

impl AstNode for CilNode {
    fn flavor(&self) -> Flavor {
        self.flavor
    }

    fn data(&self) -> &NodeData {
        &self.data
    }

    fn first_child(&self) -> Option<&Self> {
        self.first_child.as_deref()
    }

    fn next_sibling(&self) -> Option<&Self> {
        self.next_sibling.as_deref()
    }

    fn line(&self) -> u32 {
        self.line
    }
}

/// A complete parsed policy: one root `CilNode` plus nothing else — the
/// core needs no out-of-band index, since every lookup it performs walks
/// the tree it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CilTree {
    root: CilNode,
}

impl CilTree {
    #[must_use]
    pub fn new(root: CilNode) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &CilNode {
        &self.root
    }
}

/// A precomputed hash pair, used where a caller already has `(full,
/// partial)` in hand and wants to attach it to a node without recomputing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashPair {
    pub full: Hash32,
    pub partial: Hash32,
}
