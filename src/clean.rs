//! Style cleanup pass over the document tree.

use tracing::{debug, info, warn};

use crate::Options;
use crate::ast::*;
use crate::error::CleanError;
use crate::properties::is_container;
use crate::simplify::{Inherited, RemovalReason, simplify};
use crate::style::{decode, encode};

/// What a cleanup pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub inapplicable: usize,
    pub inherited: usize,
    pub default: usize,
    /// Declarations that were not `name:value`
    pub malformed: usize,
}

impl CleanReport {
    pub fn removed(&self) -> usize {
        self.inapplicable + self.inherited + self.default
    }

    fn record(&mut self, reason: RemovalReason) {
        match reason {
            RemovalReason::Inapplicable => self.inapplicable += 1,
            RemovalReason::Inherited => self.inherited += 1,
            RemovalReason::Default => self.default += 1,
        }
    }
}

/// Simplify every inline style under the document's single `<svg>` element.
///
/// The `<svg>` element's own style is left alone and does not seed the
/// inherited context. Fails if the document holds no `<svg>` element or more
/// than one. When neither pass is enabled the tree is left as it is.
pub fn clean(doc: &mut Document, options: &Options) -> Result<CleanReport, CleanError> {
    let mut count = 0;
    doc.for_each_element(|e| {
        if e.is("svg") {
            count += 1;
        }
    });
    if count != 1 {
        return Err(CleanError::SvgRootCount(count));
    }

    let mut report = CleanReport::default();
    if !options.remove_inapplicable && !options.remove_redundant {
        return Ok(report);
    }

    let svg = find_svg(&mut doc.root).ok_or(CleanError::SvgRootCount(0))?;
    debug!("cleaning styles");
    let inherited = Inherited::new();
    for child in svg.child_elements_mut() {
        clean_element(child, &inherited, options, &mut report);
    }
    debug!(removed = report.removed(), malformed = report.malformed, "done");

    Ok(report)
}

fn find_svg(elem: &mut Element) -> Option<&mut Element> {
    if elem.is("svg") {
        return Some(elem);
    }
    elem.child_elements_mut().find_map(find_svg)
}

/// Children are visited after their parent is rewritten, so they see the
/// context built from the parent's reduced style.
fn clean_element(elem: &mut Element, inherited: &Inherited, options: &Options, report: &mut CleanReport) {
    let tag = elem.name.full_name();
    let container = is_container(&tag);

    let Some(text) = elem.get_attr("style").map(str::to_string) else {
        if container {
            for child in elem.child_elements_mut() {
                clean_element(child, inherited, options, report);
            }
        }
        return;
    };

    let (style, warnings) = decode(&text);
    for warning in &warnings {
        warn!(tag = %tag, "{}", warning);
    }
    report.malformed += warnings.len();

    let simplified = simplify(&tag, &style, inherited, options);
    for removal in &simplified.removals {
        info!(
            tag = %tag,
            "property '{}' ('{}') {}, removed",
            removal.property, removal.value, removal.reason
        );
        report.record(removal.reason);
    }

    // untouched, well-formed styles keep their original text
    if !simplified.removals.is_empty() || !warnings.is_empty() {
        if simplified.style.is_empty() {
            elem.remove_attr("style");
        } else {
            elem.set_attr("style", encode(&simplified.style));
        }
    }

    if container {
        let inherited = inherited.overlay(&simplified.style);
        for child in elem.child_elements_mut() {
            clean_element(child, &inherited, options, report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;
    use crate::serialize::serialize;

    fn run(svg: &str, options: &Options) -> String {
        let mut doc = parse_document(svg).unwrap();
        clean(&mut doc, options).unwrap();
        serialize(&doc, options)
    }

    fn redundant() -> Options {
        Options {
            remove_redundant: true,
            ..Options::default()
        }
    }

    fn inapplicable() -> Options {
        Options {
            remove_inapplicable: true,
            ..Options::default()
        }
    }

    #[test]
    fn test_inherited_stroke_width() {
        let input = r#"<svg><g style="stroke-width:2px"><line style="stroke-width:2px" x1="0"/><line style="stroke-width:3px" x1="0"/></g></svg>"#;
        assert_eq!(
            run(input, &redundant()),
            r#"<svg><g style="stroke-width:2px"><line x1="0"/><line style="stroke-width:3px" x1="0"/></g></svg>"#
        );
    }

    #[test]
    fn test_marker_on_rect() {
        let input = r#"<svg><rect style="marker-start:none;fill:red"/></svg>"#;
        assert_eq!(
            run(input, &inapplicable()),
            r#"<svg><rect style="fill:red"/></svg>"#
        );
    }

    #[test]
    fn test_context_passes_through_unstyled_container() {
        let input = r#"<svg><g style="stroke-width:2px"><g><g style="fill:red"><path style="stroke-width:2px"/></g></g></g></svg>"#;
        assert_eq!(
            run(input, &redundant()),
            r#"<svg><g style="stroke-width:2px"><g><g style="fill:red"><path/></g></g></g></svg>"#
        );
    }

    #[test]
    fn test_siblings_do_not_share_context() {
        let input = r#"<svg><g style="stroke-width:2px"/><g><path style="stroke-width:2px"/></g></svg>"#;
        assert_eq!(run(input, &redundant()), input);
    }

    #[test]
    fn test_overridden_value_is_propagated() {
        let input = r#"<svg><g style="stroke-width:2px"><g style="stroke-width:3px"><path style="stroke-width:3px"/><path style="stroke-width:2px"/></g></g></svg>"#;
        assert_eq!(
            run(input, &redundant()),
            r#"<svg><g style="stroke-width:2px"><g style="stroke-width:3px"><path/><path style="stroke-width:2px"/></g></g></svg>"#
        );
    }

    #[test]
    fn test_removed_property_does_not_propagate() {
        let input = r#"<svg><a style="font-family:Sans"><text style="font-family:Sans">x</text></a></svg>"#;
        let both = Options {
            remove_inapplicable: true,
            remove_redundant: true,
            pretty: false,
        };
        // font-family does not apply to <a>, so the text keeps its own
        assert_eq!(
            run(input, &both),
            r#"<svg><a><text style="font-family:Sans">x</text></a></svg>"#
        );
        // without the inapplicable pass the ancestor value makes it redundant
        assert_eq!(
            run(input, &redundant()),
            r#"<svg><a style="font-family:Sans"><text>x</text></a></svg>"#
        );
    }

    #[test]
    fn test_leaf_elements_are_not_descended() {
        // <text> is not a container, so its tspan keeps the repeated value
        let input = r#"<svg><text style="font-family:Sans"><tspan style="font-family:Sans">x</tspan></text></svg>"#;
        assert_eq!(run(input, &redundant()), input);
    }

    #[test]
    fn test_root_svg_style_is_left_alone() {
        let input = r#"<svg style="opacity:1;stroke-width:2"><path style="stroke-width:2"/></svg>"#;
        assert_eq!(run(input, &redundant()), input);

        // the walk still reaches the children
        let input = r#"<svg style="opacity:1"><path style="opacity:1"/></svg>"#;
        assert_eq!(
            run(input, &redundant()),
            r#"<svg style="opacity:1"><path/></svg>"#
        );
    }

    #[test]
    fn test_svg_nested_in_other_root() {
        let input = r#"<html><body><svg><rect style="opacity:1"/></svg></body></html>"#;
        assert_eq!(
            run(input, &redundant()),
            r#"<html><body><svg><rect/></svg></body></html>"#
        );
    }

    #[test]
    fn test_untouched_style_keeps_its_text() {
        let input = r#"<svg><rect style=" fill : red ; stroke:blue "/></svg>"#;
        assert_eq!(run(input, &redundant()), input);
    }

    #[test]
    fn test_rewritten_style_is_normalized() {
        let input = r#"<svg><rect style=" fill : red ; opacity:1 "/></svg>"#;
        assert_eq!(
            run(input, &redundant()),
            r#"<svg><rect style="fill:red"/></svg>"#
        );
    }

    #[test]
    fn test_malformed_style_is_normalized() {
        let input = r#"<svg><rect style="fill:red;;:blue;stroke"/></svg>"#;
        assert_eq!(
            run(input, &inapplicable()),
            r#"<svg><rect style="fill:red;stroke:0"/></svg>"#
        );
    }

    #[test]
    fn test_no_passes_leaves_tree_alone() {
        let input = r#"<svg><g style="stroke-width:2px"><line style="stroke-width:2px;marker-end:none"/></g></svg>"#;
        assert_eq!(run(input, &Options::default()), input);
    }

    #[test]
    fn test_idempotent_on_document() {
        let input = r#"<svg style="stroke-width:1"><g style="stroke-width:2px;marker:none"><rect style="stroke-width:2px;marker-end:none;fill:black"/><g style="opacity:1.0"><circle style="stroke-width:1.0;stroke-dashoffset:0px"/></g></g></svg>"#;
        let options = Options {
            remove_inapplicable: true,
            remove_redundant: true,
            pretty: false,
        };
        let once = run(input, &options);
        assert_eq!(run(&once, &options), once);
    }

    #[test]
    fn test_report_counts() {
        let input = r#"<svg><g style="stroke-width:2px"><rect style="stroke-width:2px;marker-end:none;opacity:1;bogus"/></g></svg>"#;
        let mut doc = parse_document(input).unwrap();
        let report = clean(
            &mut doc,
            &Options {
                remove_inapplicable: true,
                remove_redundant: true,
                pretty: false,
            },
        )
        .unwrap();
        assert_eq!(
            report,
            CleanReport {
                inapplicable: 1,
                inherited: 1,
                default: 1,
                malformed: 1,
            }
        );
        assert_eq!(report.removed(), 3);
    }

    #[test]
    fn test_requires_exactly_one_svg() {
        let mut doc = parse_document("<g/>").unwrap();
        assert!(matches!(
            clean(&mut doc, &redundant()),
            Err(CleanError::SvgRootCount(0))
        ));

        let mut doc = parse_document("<svg><svg/></svg>").unwrap();
        assert!(matches!(
            clean(&mut doc, &redundant()),
            Err(CleanError::SvgRootCount(2))
        ));

        // checked even when nothing would be removed
        let mut doc = parse_document("<g/>").unwrap();
        assert!(clean(&mut doc, &Options::default()).is_err());
    }
}
