//! Presentation property knowledge base.
//!
//! One row per SVG presentation property: which tags it applies to, whether it
//! inherits, and what value it takes when absent. A property with no row is
//! unknown and is never touched.

/// Elements that may carry children and pass inherited style down to them.
pub const CONTAINER: &[&str] = &[
    "svg", "g", "defs", "symbol", "clipPath", "mask", "pattern", "marker", "a", "switch",
];

pub const GRAPHICS: &[&str] = &[
    "path", "text", "rect", "circle", "ellipse", "line", "polyline", "polygon", "image", "use",
];

pub const TEXT: &[&str] = &["text", "tspan", "tref", "textPath"];

pub const TEXT2: &[&str] = &["text", "tspan", "tref", "textPath", "altGlyph"];

const CONTAINER_OR_GRAPHICS: &[&str] = &[
    "svg", "g", "defs", "symbol", "clipPath", "mask", "pattern", "marker", "a", "switch", "path",
    "text", "rect", "circle", "ellipse", "line", "polyline", "polygon", "image", "use",
];

const VIEWPORTS: &[&str] = &["symbol", "image", "foreignObject"];

const MARKABLE: &[&str] = &["path", "line", "polyline", "polygon"];

const LIGHTING: &[&str] = &["feDiffuseLighting", "feSpecularLighting"];

/// Units accepted after a zero length.
const ZERO_UNITS: &[&str] = &["", "%", "px", "em", "ex", "pt", "pc", "mm", "cm", "in"];

/// True if `tag` may have children that inherit its style.
pub fn is_container(tag: &str) -> bool {
    CONTAINER.contains(&tag)
}

/// The set of element names a property has an effect on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliesTo {
    All,
    Tags(&'static [&'static str]),
}

impl AppliesTo {
    pub fn contains(self, tag: &str) -> bool {
        match self {
            AppliesTo::All => true,
            AppliesTo::Tags(tags) => tags.contains(&tag),
        }
    }
}

/// How a declared value is compared against the property's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Exact string equality.
    Literal,
    /// Both sides denote zero, with an optional length unit.
    Zero,
    /// Both sides are the same integer, allowing a fraction of zeros ("1.00").
    Integer,
}

impl Comparator {
    pub fn equivalent(self, a: &str, b: &str) -> bool {
        match self {
            Comparator::Literal => a == b,
            Comparator::Zero => is_zero(a) && is_zero(b),
            Comparator::Integer => match (parse_integer(a), parse_integer(b)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

fn is_zero(value: &str) -> bool {
    let digits = value.replace('.', "0");
    ZERO_UNITS.contains(&digits.trim_start_matches('0'))
}

fn parse_integer(value: &str) -> Option<i64> {
    let value = if value.contains('.') {
        let value = value.trim_end_matches('0');
        value.strip_suffix('.').unwrap_or(value)
    } else {
        value
    };
    value.parse().ok()
}

/// The value a property takes when it is not declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultValue {
    pub comparator: Comparator,
    pub value: &'static str,
}

impl DefaultValue {
    pub fn matches(&self, value: &str) -> bool {
        self.comparator.equivalent(value, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyRule {
    pub name: &'static str,
    pub applies_to: AppliesTo,
    pub inherits: bool,
    pub default: Option<DefaultValue>,
}

const fn rule(
    name: &'static str,
    applies_to: AppliesTo,
    inherits: bool,
    default: Option<DefaultValue>,
) -> PropertyRule {
    PropertyRule {
        name,
        applies_to,
        inherits,
        default,
    }
}

const fn literal(value: &'static str) -> Option<DefaultValue> {
    Some(DefaultValue {
        comparator: Comparator::Literal,
        value,
    })
}

const fn integer(value: &'static str) -> Option<DefaultValue> {
    Some(DefaultValue {
        comparator: Comparator::Integer,
        value,
    })
}

const ZERO: Option<DefaultValue> = Some(DefaultValue {
    comparator: Comparator::Zero,
    value: "0",
});

use AppliesTo::{All, Tags};

/// Sorted by name; looked up with a binary search.
#[rustfmt::skip]
static PROPERTIES: &[PropertyRule] = &[
    rule("alignment-baseline",           Tags(TEXT2),                 false, None),
    rule("baseline-shift",               Tags(TEXT2),                 false, literal("baseline")),
    rule("clip",                         Tags(VIEWPORTS),             false, literal("auto")),
    rule("clip-path",                    All,                         false, literal("none")),
    rule("clip-rule",                    All,                         true,  literal("nonzero")),
    rule("color",                        All,                         false, None),
    rule("color-interpolation",          All,                         true,  None),
    rule("color-profile",                All,                         true,  None),
    rule("color-rendering",              All,                         true,  None),
    rule("cursor",                       Tags(CONTAINER_OR_GRAPHICS), true,  literal("auto")),
    rule("direction",                    Tags(TEXT),                  true,  literal("ltr")),
    rule("display",                      All,                         false, literal("inline")),
    rule("dominant-baseline",            Tags(TEXT2),                 false, literal("auto")),
    rule("enable-background",            Tags(CONTAINER),             false, literal("accumulate")),
    rule("fill",                         All,                         false, literal("black")),
    rule("fill-opacity",                 All,                         true,  integer("1")),
    rule("fill-rule",                    All,                         true,  literal("nonzero")),
    rule("filter",                       Tags(CONTAINER_OR_GRAPHICS), false, literal("none")),
    rule("flood-color",                  Tags(&["feFlood"]),          false, literal("black")),
    rule("flood-opacity",                Tags(&["feFlood"]),          false, integer("1")),
    rule("font",                         Tags(TEXT),                  true,  None),
    rule("font-family",                  Tags(TEXT2),                 true,  None),
    rule("font-size",                    Tags(TEXT2),                 false, literal("medium")),
    rule("font-size-adjust",             All,                         true,  literal("none")),
    rule("font-stretch",                 Tags(TEXT2),                 true,  literal("normal")),
    rule("font-style",                   Tags(TEXT2),                 true,  literal("normal")),
    rule("font-variant",                 All,                         true,  literal("normal")),
    rule("font-weight",                  Tags(TEXT2),                 true,  literal("normal")),
    rule("glyph-orientation-horizontal", Tags(TEXT2),                 true,  ZERO),
    rule("glyph-orientation-vertical",   Tags(TEXT2),                 true,  literal("auto")),
    rule("image-rendering",              Tags(&["image"]),            true,  literal("auto")),
    rule("kerning",                      Tags(TEXT2),                 true,  literal("auto")),
    rule("letter-spacing",               Tags(TEXT2),                 true,  literal("normal")),
    rule("lighting-color",               Tags(LIGHTING),              false, literal("white")),
    rule("marker",                       Tags(MARKABLE),              false, None),
    rule("marker-end",                   Tags(MARKABLE),              false, literal("none")),
    rule("marker-mid",                   Tags(MARKABLE),              false, literal("none")),
    rule("marker-start",                 Tags(MARKABLE),              false, literal("none")),
    rule("mask",                         All,                         false, literal("none")),
    rule("opacity",                      All,                         false, integer("1")),
    rule("overflow",                     Tags(VIEWPORTS),             false, None),
    rule("pointer-events",               Tags(CONTAINER_OR_GRAPHICS), true,  literal("visiblePainted")),
    rule("shape-rendering",              All,                         true,  literal("auto")),
    rule("stop-color",                   Tags(&["stop"]),             false, literal("black")),
    rule("stop-opacity",                 Tags(&["stop"]),             false, integer("1")),
    rule("stroke",                       All,                         false, literal("none")),
    rule("stroke-dasharray",             All,                         true,  literal("none")),
    rule("stroke-dashoffset",            All,                         true,  ZERO),
    rule("stroke-linecap",               All,                         true,  literal("butt")),
    rule("stroke-linejoin",              All,                         true,  literal("miter")),
    rule("stroke-miterlimit",            All,                         true,  integer("4")),
    rule("stroke-opacity",               All,                         true,  integer("1")),
    rule("stroke-width",                 All,                         true,  integer("1")),
    rule("text-anchor",                  Tags(TEXT2),                 true,  literal("start")),
    rule("text-decoration",              Tags(TEXT2),                 false, literal("none")),
    rule("text-rendering",               Tags(&["text"]),             true,  literal("auto")),
    rule("unicode-bidi",                 Tags(TEXT),                  false, literal("normal")),
    rule("visibility",                   All,                         false, literal("inherit")),
    rule("word-spacing",                 Tags(TEXT2),                 true,  literal("normal")),
    rule("writing-mode",                 Tags(&["text"]),             true,  literal("lr-tb")),
];

/// Look up a property by name. `None` means the property is unknown.
pub fn lookup(property: &str) -> Option<&'static PropertyRule> {
    PROPERTIES
        .binary_search_by(|rule| rule.name.cmp(property))
        .ok()
        .map(|i| &PROPERTIES[i])
}

/// Every known property, sorted by name.
pub fn all() -> &'static [PropertyRule] {
    PROPERTIES
}

/// Whether `property` has any effect on `tag`. Unknown properties apply everywhere.
pub fn is_applicable(property: &str, tag: &str) -> bool {
    lookup(property).is_none_or(|rule| rule.applies_to.contains(tag))
}

/// Whether `property` inherits. Unknown properties do not.
pub fn does_inherit(property: &str) -> bool {
    lookup(property).is_some_and(|rule| rule.inherits)
}

/// The default-value rule registered for `property`, if any.
pub fn default_rule(property: &str) -> Option<DefaultValue> {
    lookup(property).and_then(|rule| rule.default)
}
