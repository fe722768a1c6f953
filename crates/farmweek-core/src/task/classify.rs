//! Free-text task classifier.
//!
//! A prioritized keyword cascade: rules are evaluated in a fixed order,
//! the first match wins, and anything unmatched falls back to
//! [`TaskKind::General`]. Weather-insensitive rules come first so that
//! e.g. "check sprayer nozzles" is an equipment check, not a spray run.

use super::TaskKind;

/// Classify a free-text task description into a [`TaskKind`].
pub fn classify(text: &str) -> TaskKind {
    let text = text.to_lowercase();
    let has = |needle: &str| text.contains(needle);

    // Weather-insensitive work first
    if has("purchase") || has("buy") || has("order supplies") || has("budget") || has("supplies list")
    {
        return TaskKind::Purchase;
    }
    if has("heating") || has("fuel") || has("insulation") || has("thermal curtain") || has("frost cloth")
    {
        return TaskKind::Heating;
    }
    if has("facility")
        || has("equipment")
        || has("machinery")
        || (has("inspect") && (has("sprayer") || has("pump") || has("heater")))
    {
        return TaskKind::Equipment;
    }
    if has("planning") || has_word(&text, "plan") || has("record") || has("notes") || has("review")
        || has("analysis")
    {
        return TaskKind::Planning;
    }
    if has("cleanup") || has("clean up") || has("dispose") || has("disposal") || has("shredding") {
        return TaskKind::Cleaning;
    }
    if has("observe") || has("observation") || has("monitor") || (has("check") && !has("soil")) {
        return TaskKind::Observation;
    }
    if has("sensor") || has("measurement") || has("data logger") {
        return TaskKind::Sensor;
    }

    // Weather-sensitive work
    if has_word(&text, "ga") || has("gibberellin") {
        return TaskKind::Gibberellin;
    }
    if has("merit") {
        return TaskKind::Merit;
    }
    if has("spray") || has("pesticide") || has("fungicide") || has("insecticide") || has("pest control")
    {
        return TaskKind::Spray;
    }
    if has("foliar") {
        return TaskKind::FoliarFeed;
    }
    if has("water") || has("irrigat") {
        return TaskKind::Irrigation;
    }
    if has("prun") || has("train") || has("thinning") || has("pinch") || has("shoot") {
        return TaskKind::Pruning;
    }
    if has("cluster shaping") || has("flower cluster") || has("bloom") {
        return TaskKind::ClusterShaping;
    }
    if has("bagging") || has("bag clusters") {
        return TaskKind::Bagging;
    }
    if has("harvest") || has("sorting") || has("grading") {
        return TaskKind::Harvest;
    }
    if has("ventilat") {
        return TaskKind::Ventilation;
    }
    if has("soil") {
        return TaskKind::SoilCheck;
    }
    if has("mulch") {
        return TaskKind::Mulching;
    }
    if has("microbial") || has_word(&text, "pf") {
        return TaskKind::Microbial;
    }

    TaskKind::General
}

/// Whole-word containment, so a short tag like "ga" does not fire on
/// "bagging" or "organic".
fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins_in_rule_order() {
        // "check" alone is observation, but "check soil" hands off to
        // the soil rule further down.
        assert_eq!(classify("check vine growth"), TaskKind::Observation);
        assert_eq!(classify("check soil moisture"), TaskKind::SoilCheck);
    }

    #[test]
    fn insensitive_rules_shadow_sensitive_keywords() {
        assert_eq!(classify("inspect sprayer before season"), TaskKind::Equipment);
        assert_eq!(classify("spray fungicide on block A"), TaskKind::Spray);
    }

    #[test]
    fn short_tags_need_word_boundaries() {
        assert_eq!(classify("GA treatment round 2"), TaskKind::Gibberellin);
        assert_eq!(classify("cluster bagging"), TaskKind::Bagging);
        assert_eq!(classify("apply PF inoculant"), TaskKind::Microbial);
    }

    #[test]
    fn sensitive_keywords() {
        assert_eq!(classify("merit solution dip"), TaskKind::Merit);
        assert_eq!(classify("foliar calcium feed"), TaskKind::FoliarFeed);
        assert_eq!(classify("irrigate block B"), TaskKind::Irrigation);
        assert_eq!(classify("prune laterals"), TaskKind::Pruning);
        assert_eq!(classify("flower cluster shaping"), TaskKind::ClusterShaping);
        assert_eq!(classify("harvest campbell early"), TaskKind::Harvest);
        assert_eq!(classify("ventilation adjustment"), TaskKind::Ventilation);
        assert_eq!(classify("lay mulch film"), TaskKind::Mulching);
    }

    #[test]
    fn unmatched_text_falls_back_to_general() {
        assert_eq!(classify("miscellaneous yard work"), TaskKind::General);
        assert_eq!(classify(""), TaskKind::General);
    }
}
