//! Additive role scoring for leaves.
//!
//! Each [`ScoringRule`] is an independent predicate that adds its weight to
//! one role when it holds. The role with the highest total wins; a scan from
//! left to right only replaces the current best on a strictly greater score,
//! so ties go to the role listed first in [`LEAF_CANDIDATES`]. New
//! heuristics are new table entries.

use crate::tags;
use core::fmt;
use skeleton_core::{MeasurementNode, SkeletonConfig, SkeletonKind};

/// Winning scores at or below this fall back to [`SkeletonKind::Text`].
pub const DEFAULT_TEXT_THRESHOLD: u32 = 30;

/// Leaf roles in tie-breaking order.
pub const LEAF_CANDIDATES: [SkeletonKind; 6] = [
    SkeletonKind::Text,
    SkeletonKind::Image,
    SkeletonKind::Icon,
    SkeletonKind::Button,
    SkeletonKind::Input,
    SkeletonKind::Skip,
];

/// Areas below this (px²) look like spacers.
pub const SKIP_AREA: f32 = 100.0;
/// Boxes thinner than this (px) in either dimension look like rules or spacers.
pub const SKIP_THICKNESS: f32 = 5.0;
/// Pointer-cursor elements smaller than this (px²) look clickable.
pub const BUTTON_MAX_AREA: f32 = 20_000.0;
/// Aspect ratio band for square-ish icons.
pub const ICON_ASPECT: (f32, f32) = (0.8, 1.2);

pub type Predicate = fn(&MeasurementNode, &SkeletonConfig) -> bool;

/// One heuristic: `weight` goes to `role` whenever `predicate` holds.
#[derive(Clone, Copy)]
pub struct ScoringRule {
    pub name: &'static str,
    pub role: SkeletonKind,
    pub weight: u32,
    pub predicate: Predicate,
}

impl ScoringRule {
    pub const fn new(
        name: &'static str,
        role: SkeletonKind,
        weight: u32,
        predicate: Predicate,
    ) -> Self {
        Self {
            name,
            role,
            weight,
            predicate,
        }
    }
}

impl fmt::Debug for ScoringRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScoringRule")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

/// Accumulated score per role, in candidate order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleScores {
    scores: Vec<(SkeletonKind, u32)>,
}

impl Default for RoleScores {
    fn default() -> Self {
        Self {
            scores: LEAF_CANDIDATES.iter().map(|kind| (*kind, 0)).collect(),
        }
    }
}

impl RoleScores {
    /// Add `weight` to `role`. Roles outside the candidate list are appended.
    pub fn add(&mut self, role: SkeletonKind, weight: u32) {
        if let Some(entry) = self.scores.iter_mut().find(|(kind, _)| *kind == role) {
            entry.1 = entry.1.saturating_add(weight);
        } else {
            self.scores.push((role, weight));
        }
    }

    pub fn get(&self, role: SkeletonKind) -> u32 {
        self.scores
            .iter()
            .find(|(kind, _)| *kind == role)
            .map_or(0, |(_, score)| *score)
    }

    /// Highest-scoring role, containers excluded; first wins on ties.
    pub fn best(&self) -> (SkeletonKind, u32) {
        let mut best = (SkeletonKind::Text, self.get(SkeletonKind::Text));
        for &(kind, score) in &self.scores {
            if kind != SkeletonKind::Container && score > best.1 {
                best = (kind, score);
            }
        }
        best
    }
}

/// An ordered rule table plus the default-to-text threshold.
#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<ScoringRule>,
    text_threshold: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(default_rules(), DEFAULT_TEXT_THRESHOLD)
    }
}

impl RuleSet {
    pub const fn new(rules: Vec<ScoringRule>, text_threshold: u32) -> Self {
        Self {
            rules,
            text_threshold,
        }
    }

    /// Append a heuristic; it is evaluated after the existing ones.
    pub fn push(&mut self, rule: ScoringRule) {
        self.rules.push(rule);
    }

    pub fn score(&self, node: &MeasurementNode, config: &SkeletonConfig) -> RoleScores {
        let mut scores = RoleScores::default();
        for rule in &self.rules {
            if (rule.predicate)(node, config) {
                scores.add(rule.role, rule.weight);
            }
        }
        scores
    }

    /// Winning leaf role for `node`.
    pub fn infer(&self, node: &MeasurementNode, config: &SkeletonConfig) -> SkeletonKind {
        let scores = self.score(node, config);
        let (kind, score) = scores.best();
        log::trace!("<{}> scored {scores:?}", node.tag);
        if score > self.text_threshold {
            kind
        } else {
            SkeletonKind::Text
        }
    }
}

/// The stock heuristics.
pub fn default_rules() -> Vec<ScoringRule> {
    use SkeletonKind::{Button, Icon, Image, Input, Skip, Text};
    vec![
        ScoringRule::new("own-text", Text, 40, |node, _| node.has_text()),
        ScoringRule::new("text-line-height", Text, 30, |node, config| {
            let height = node.rect.height;
            height >= config.min_text_height && height < config.min_text_height * 3.0
        }),
        ScoringRule::new("text-tag", Text, 20, |node, _| tags::is_text_bearing(&node.tag)),
        ScoringRule::new("font-size", Text, 20, |node, _| {
            node.style
                .font_size_px()
                .is_some_and(|size| size > 0.0 && size < 100.0)
        }),
        ScoringRule::new("image-tag", Image, 100, |node, _| tags::is_image(&node.tag)),
        ScoringRule::new("image-role", Image, 60, |node, _| node.attr("role") == Some("img")),
        ScoringRule::new("background-image", Image, 50, |node, _| {
            node.style.has_background_image()
        }),
        ScoringRule::new("image-area", Image, 30, |node, config| {
            node.rect.area() > config.min_image_size * config.min_image_size
        }),
        ScoringRule::new("svg-tag", Icon, 70, |node, _| tags::is_vector_graphic(&node.tag)),
        ScoringRule::new("icon-shape", Icon, 40, |node, config| {
            let aspect = node.rect.aspect_ratio();
            node.rect.area() < config.icon_max_size * config.icon_max_size
                && (ICON_ASPECT.0..=ICON_ASPECT.1).contains(&aspect)
        }),
        ScoringRule::new("button-tag", Button, 80, |node, _| tags::is_button(&node.tag)),
        ScoringRule::new("button-role", Button, 60, |node, _| {
            node.attr("role") == Some("button")
        }),
        ScoringRule::new("pointer-cursor", Button, 30, |node, _| {
            node.style.has_pointer_cursor() && node.rect.area() < BUTTON_MAX_AREA
        }),
        ScoringRule::new("field-tag", Input, 80, |node, _| tags::is_form_field(&node.tag)),
        ScoringRule::new("content-editable", Input, 50, |node, _| {
            node.attr("contenteditable")
                .is_some_and(|value| !value.eq_ignore_ascii_case("false"))
        }),
        ScoringRule::new("tiny-area", Skip, 50, |node, _| node.rect.area() < SKIP_AREA),
        ScoringRule::new("thin-box", Skip, 40, |node, _| {
            node.rect.height < SKIP_THICKNESS || node.rect.width < SKIP_THICKNESS
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use skeleton_core::{Rect, StyleSnapshot};

    fn leaf(tag: &str, width: f32, height: f32) -> MeasurementNode {
        MeasurementNode::new(tag, Rect::new(0.0, 0.0, width, height), StyleSnapshot::default())
    }

    /// # Panics
    /// Panics if ties are not resolved in favour of the earlier role.
    #[test]
    fn ties_go_to_the_first_candidate() {
        // 10x10 div: text gets tag + font size (40), icon gets shape (40).
        let node = leaf("div", 10.0, 10.0);
        let scores = RuleSet::default().score(&node, &SkeletonConfig::default());
        assert_eq!(scores.get(SkeletonKind::Text), 40);
        assert_eq!(scores.get(SkeletonKind::Icon), 40);
        assert_eq!(scores.best(), (SkeletonKind::Text, 40));
    }

    /// # Panics
    /// Panics if a low winning score does not fall back to text.
    #[test]
    fn weak_winner_defaults_to_text() {
        // 60x60 section: only image-area (30) fires besides font size.
        let mut node = leaf("section", 60.0, 60.0);
        node.style.font_size = "0px".to_owned();
        let rules = RuleSet::default();
        let config = SkeletonConfig::default();
        assert_eq!(rules.score(&node, &config).best(), (SkeletonKind::Image, 30));
        assert_eq!(rules.infer(&node, &config), SkeletonKind::Text);
    }

    /// # Panics
    /// Panics if skip can never win on its own score.
    #[test]
    fn skip_wins_when_it_dominates() {
        let mut node = leaf("hr", 300.0, 2.0);
        node.style.font_size = "0px".to_owned();
        let rules = RuleSet::default();
        let config = SkeletonConfig::default();
        assert_eq!(rules.infer(&node, &config), SkeletonKind::Skip);
    }

    /// # Panics
    /// Panics if custom rules are not evaluated.
    #[test]
    fn custom_rules_extend_the_table() {
        let mut rules = RuleSet::default();
        rules.push(ScoringRule::new("avatar-class", SkeletonKind::Image, 200, |node, _| {
            node.attr("class").is_some_and(|class| class.contains("avatar"))
        }));
        let mut node = leaf("span", 40.0, 40.0);
        node.attributes.insert("class".to_owned(), "avatar".to_owned());
        assert_eq!(
            rules.infer(&node, &SkeletonConfig::default()),
            SkeletonKind::Image
        );
    }

    /// No font size. A 25x40 `section` built this way scores zero everywhere.
    fn silent(tag: &str, width: f32, height: f32) -> MeasurementNode {
        let mut node = leaf(tag, width, height);
        node.style.font_size = "0px".to_owned();
        node
    }

    fn with_attr(mut node: MeasurementNode, name: &str, value: &str) -> MeasurementNode {
        node.attributes.insert(name.to_owned(), value.to_owned());
        node
    }

    /// # Panics
    /// Panics if a single heuristic does not decide the role it scores for.
    #[test]
    fn single_rules_decide_the_role() {
        use SkeletonKind::{Button, Icon, Image, Input, Text};

        let mut backdrop = silent("section", 25.0, 40.0);
        backdrop.style.background_image = "url(hero.png)".to_owned();
        // (case, node, scored role, its score, inferred role)
        let cases = [
            ("role img", with_attr(silent("section", 25.0, 40.0), "role", "img"), Image, 60, Image),
            ("background image", backdrop, Image, 50, Image),
            ("role button", with_attr(silent("section", 25.0, 40.0), "role", "button"), Button, 60, Button),
            ("input tag", silent("input", 25.0, 40.0), Input, 80, Input),
            ("textarea tag", silent("textarea", 25.0, 40.0), Input, 80, Input),
            ("select tag", silent("select", 25.0, 40.0), Input, 80, Input),
            ("editable", with_attr(silent("section", 25.0, 40.0), "contenteditable", "true"), Input, 50, Input),
            ("bare editable", with_attr(silent("section", 25.0, 40.0), "contenteditable", ""), Input, 50, Input),
            ("not editable", with_attr(silent("section", 25.0, 40.0), "contenteditable", "false"), Input, 0, Text),
            ("not editable upper", with_attr(silent("section", 25.0, 40.0), "contenteditable", "FALSE"), Input, 0, Text),
            // Icon cases also pick up text line height (30) and, at 36x30, image area (30).
            ("aspect 0.8", silent("section", 24.0, 30.0), Icon, 40, Icon),
            ("aspect 1.2", silent("section", 36.0, 30.0), Icon, 40, Icon),
            ("aspect 1.21", silent("section", 36.3, 30.0), Icon, 0, Text),
        ];

        let rules = RuleSet::default();
        let config = SkeletonConfig::default();
        for (case, node, role, score, inferred) in cases {
            assert_eq!(rules.score(&node, &config).get(role), score, "{case}");
            assert_eq!(rules.infer(&node, &config), inferred, "{case}");
        }
    }
}
