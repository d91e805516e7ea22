//! Pattern Eliminator
//!
//! Removes phrasing that reads as templated machine output. Four ordered
//! tables are applied through the whitelist guard:
//!
//! 1. **Connectives** - formal transitions become short informal ones
//! 2. **Hedges** - meta-commentary clauses are deleted
//! 3. **Contractions** - negations first, then pronoun/copula pairs
//! 4. **Vocabulary** - stiff words are simplified
//!
//! Hedges run before contractions so "it is important to note that" is still
//! spelled out when the hedge table sees it. Negations run before
//! pronoun/copula pairs so "it is not" becomes "it isn't" rather than
//! "it's not".
//! Pronoun/copula pairs only contract when another word follows, since a
//! clause-final "what it is" cannot become "what it's".

use crate::error::HumanizeResult;
use crate::rules::{PatternRule, Replacement, RuleSpec, compile, match_case};
use crate::whitelist::ProtectedTerms;
use regex::Captures;

pub const CONNECTIVES: &[RuleSpec] = &[
    (r"\bfurthermore\b(?P<tail>,?)", Replacement::MatchCase("also")),
    (r"\bmoreover\b(?P<tail>,?)", Replacement::MatchCase("plus")),
    (r"\badditionally\b(?P<tail>,?)", Replacement::MatchCase("also")),
    (r"\btherefore\b(?P<tail>,?)", Replacement::MatchCase("so")),
    (r"\bthus\b(?P<tail>,?)", Replacement::MatchCase("so")),
    (r"\bconsequently\b(?P<tail>,?)", Replacement::MatchCase("as a result")),
    (r"\bnevertheless\b(?P<tail>,?)", Replacement::MatchCase("still")),
    (r"\bnonetheless\b(?P<tail>,?)", Replacement::MatchCase("still")),
    (r"\bhowever,", Replacement::MatchCase("but")),
    (r"\bin addition,", Replacement::MatchCase("plus,")),
    (r"\bultimately,", Replacement::MatchCase("in the end,")),
];

pub const HEDGES: &[RuleSpec] = &[
    (
        r"\b(?:it is important to note that|it is worth noting that|it should be noted that|it is worth mentioning that|it is crucial to understand that|it goes without saying that)\s+(?P<next>\w)",
        Replacement::With(drop_hedge),
    ),
    (
        r"\b(?:needless to say|as previously mentioned|as mentioned earlier|in essence),\s+(?P<next>\w)",
        Replacement::With(drop_hedge),
    ),
];

pub const CONTRACTIONS: &[RuleSpec] = &[
    (r"\bcannot\b", Replacement::MatchCase("can't")),
    (r"\bdo\s+not\b", Replacement::MatchCase("don't")),
    (r"\bdoes\s+not\b", Replacement::MatchCase("doesn't")),
    (r"\bdid\s+not\b", Replacement::MatchCase("didn't")),
    (r"\bis\s+not\b", Replacement::MatchCase("isn't")),
    (r"\bare\s+not\b", Replacement::MatchCase("aren't")),
    (r"\bwas\s+not\b", Replacement::MatchCase("wasn't")),
    (r"\bwere\s+not\b", Replacement::MatchCase("weren't")),
    (r"\bwill\s+not\b", Replacement::MatchCase("won't")),
    (r"\bwould\s+not\b", Replacement::MatchCase("wouldn't")),
    (r"\bshould\s+not\b", Replacement::MatchCase("shouldn't")),
    (r"\bcould\s+not\b", Replacement::MatchCase("couldn't")),
    (r"\bhave\s+not\b", Replacement::MatchCase("haven't")),
    (r"\bhas\s+not\b", Replacement::MatchCase("hasn't")),
    (r"\bit\s+is(?P<tail>\s+\w)", Replacement::MatchCase("it's")),
    (r"\bthat\s+is(?P<tail>\s+\w)", Replacement::MatchCase("that's")),
    (r"\bthere\s+is(?P<tail>\s+\w)", Replacement::MatchCase("there's")),
    (r"\bthey\s+are(?P<tail>\s+\w)", Replacement::MatchCase("they're")),
    (r"\bwe\s+are(?P<tail>\s+\w)", Replacement::MatchCase("we're")),
    (r"\byou\s+are(?P<tail>\s+\w)", Replacement::MatchCase("you're")),
];

pub const VOCABULARY: &[RuleSpec] = &[
    (r"\butili[sz]ation\b", Replacement::MatchCase("use")),
    (r"\butili[sz](?P<suffix>e|es|ed|ing)\b", Replacement::With(utilize)),
    (r"\bdemonstrat(?P<suffix>e|es|ed|ing)\b", Replacement::With(demonstrate)),
    (r"\bfacilitat(?P<suffix>e|es|ed|ing)\b", Replacement::With(facilitate)),
    (r"\bcommenc(?P<suffix>e|es|ed|ing)\b", Replacement::With(commence)),
    (r"\bterminat(?P<suffix>e|es|ed|ing)\b", Replacement::With(terminate)),
    (r"\bdelv(?P<suffix>e|es|ed|ing)\s+into\b", Replacement::With(delve)),
    (r"\bsignificantly\b", Replacement::MatchCase("greatly")),
    (r"\bsignificant\b", Replacement::MatchCase("major")),
    (r"\bsubstantially\b", Replacement::MatchCase("largely")),
    (r"\bsubstantial\b", Replacement::MatchCase("strong")),
    (r"\bcomprehensive\b", Replacement::MatchCase("complete")),
    (r"\bin\s+order\s+to\b", Replacement::MatchCase("to")),
    (r"\ba\s+plethora\s+of\b", Replacement::MatchCase("plenty of")),
    (r"\bprior\s+to\b", Replacement::MatchCase("before")),
    (r"\bsubsequently\b", Replacement::MatchCase("later")),
    (r"\bapproximately\b", Replacement::MatchCase("about")),
];

/// Deletes a hedge, keeping the word that followed it
///
/// The first letter of that word takes over the hedge's capitalization so a
/// sentence-initial hedge still leaves a capitalized sentence behind.
fn drop_hedge(caps: &Captures<'_>) -> String {
    let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    let next = caps.name("next").map(|m| m.as_str()).unwrap_or_default();
    match_case(matched, next)
}

/// Picks the inflected form matching the captured `suffix`
fn inflect(caps: &Captures<'_>, forms: [&str; 4]) -> String {
    let [base, third, past, progressive] = forms;
    let form = match caps.name("suffix").map(|m| m.as_str().to_lowercase()).as_deref() {
        Some("es") => third,
        Some("ed") => past,
        Some("ing") => progressive,
        _ => base,
    };
    let matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    match_case(matched, form)
}

fn utilize(caps: &Captures<'_>) -> String {
    inflect(caps, ["use", "uses", "used", "using"])
}

fn demonstrate(caps: &Captures<'_>) -> String {
    inflect(caps, ["show", "shows", "showed", "showing"])
}

fn facilitate(caps: &Captures<'_>) -> String {
    inflect(caps, ["help", "helps", "helped", "helping"])
}

fn commence(caps: &Captures<'_>) -> String {
    inflect(caps, ["start", "starts", "started", "starting"])
}

fn terminate(caps: &Captures<'_>) -> String {
    inflect(caps, ["end", "ends", "ended", "ending"])
}

fn delve(caps: &Captures<'_>) -> String {
    inflect(caps, ["dig into", "digs into", "dug into", "digging into"])
}

/// The compiled eliminator tables
#[derive(Debug, Clone)]
pub struct PatternEliminator {
    connectives: Vec<PatternRule>,
    hedges: Vec<PatternRule>,
    contractions: Vec<PatternRule>,
    vocabulary: Vec<PatternRule>,
}

impl PatternEliminator {
    pub fn new() -> HumanizeResult<Self> {
        Ok(Self {
            connectives: compile(CONNECTIVES)?,
            hedges: compile(HEDGES)?,
            contractions: compile(CONTRACTIONS)?,
            vocabulary: compile(VOCABULARY)?,
        })
    }

    /// All rules in application order
    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.connectives
            .iter()
            .chain(&self.hedges)
            .chain(&self.contractions)
            .chain(&self.vocabulary)
    }

    /// Run every table in order; never fails, a missing match is a no-op
    pub fn apply(&self, text: &str, terms: &ProtectedTerms) -> String {
        let text = terms.apply_all(text, &self.connectives);
        let text = terms.apply_all(&text, &self.hedges);
        let text = terms.apply_all(&text, &self.contractions);
        terms.apply_all(&text, &self.vocabulary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eliminate(text: &str) -> String {
        PatternEliminator::new()
            .unwrap()
            .apply(text, &ProtectedTerms::clinical())
    }

    // ========== Connective Tests ==========

    #[test]
    fn test_connectives_keep_case_and_comma() {
        assert_eq!(
            eliminate("Furthermore, the plan worked."),
            "Also, the plan worked."
        );
        assert_eq!(eliminate("and moreover the plan"), "and plus the plan");
        assert_eq!(
            eliminate("Consequently, prices rose."),
            "As a result, prices rose."
        );
    }

    #[test]
    fn test_however_requires_comma() {
        assert_eq!(eliminate("However, it failed."), "But it failed.");
        assert_eq!(eliminate("however much we try"), "however much we try");
    }

    #[test]
    fn test_in_addition_to_is_untouched() {
        assert_eq!(
            eliminate("In addition to cost, time matters."),
            "In addition to cost, time matters."
        );
        assert_eq!(eliminate("In addition, time matters."), "Plus, time matters.");
    }

    // ========== Hedge Tests ==========

    #[test]
    fn test_hedge_at_sentence_start_capitalizes_next_word() {
        assert_eq!(
            eliminate("Costs fell. It is worth noting that revenue grew."),
            "Costs fell. Revenue grew."
        );
    }

    #[test]
    fn test_hedge_mid_sentence() {
        assert_eq!(
            eliminate("We saw that it should be noted that costs fell."),
            "We saw that costs fell."
        );
    }

    #[test]
    fn test_hedge_runs_before_contractions() {
        // "It is" would otherwise become "It's" and the hedge would no longer match
        assert_eq!(
            eliminate("It is important to note that results vary."),
            "Results vary."
        );
    }

    #[test]
    fn test_hedge_deletion_leaves_no_double_space() {
        let out = eliminate("Needless to say, the team won.");
        assert_eq!(out, "The team won.");
        assert!(!out.contains("  "));
    }

    // ========== Contraction Tests ==========

    #[test]
    fn test_contractions() {
        assert_eq!(eliminate("We cannot go."), "We can't go.");
        assert_eq!(eliminate("They do not know."), "They don't know.");
        assert_eq!(eliminate("It will not rain."), "It won't rain.");
        assert_eq!(eliminate("You are right."), "You're right.");
        assert_eq!(eliminate("That is fine."), "That's fine.");
    }

    #[test]
    fn test_clause_final_copula_stays_spelled_out() {
        assert_eq!(eliminate("I know what it is."), "I know what it is.");
        assert_eq!(eliminate("We know who they are?"), "We know who they are?");
        assert_eq!(eliminate("Here we are, finally"), "Here we are, finally");
        assert_eq!(eliminate("That is it"), "That's it");
    }

    #[test]
    fn test_negation_wins_over_copula() {
        assert_eq!(eliminate("It is not over."), "It isn't over.");
    }

    #[test]
    fn test_contractions_do_not_rematch() {
        let once = eliminate("They are sure it is done and we do not mind.");
        assert_eq!(once, "They're sure it's done and we don't mind.");
        assert_eq!(eliminate(&once), once);
    }

    #[test]
    fn test_contraction_respects_word_boundaries() {
        assert_eq!(eliminate("The bandit isolated them."), "The bandit isolated them.");
    }

    // ========== Vocabulary Tests ==========

    #[test]
    fn test_vocabulary_inflections() {
        assert_eq!(eliminate("They utilize tools."), "They use tools.");
        assert_eq!(eliminate("She utilized tools."), "She used tools.");
        assert_eq!(
            eliminate("The data demonstrates a trend."),
            "The data shows a trend."
        );
        assert_eq!(
            eliminate("Demonstrating value matters."),
            "Showing value matters."
        );
        assert_eq!(eliminate("We delved into it."), "We dug into it.");
    }

    #[test]
    fn test_vocabulary_phrases() {
        assert_eq!(
            eliminate("We left in order to rest prior to the race."),
            "We left to rest before the race."
        );
        assert_eq!(
            eliminate("A plethora of options exist."),
            "Plenty of options exist."
        );
    }

    #[test]
    fn test_significant_and_significantly() {
        assert_eq!(
            eliminate("A significant change significantly helped."),
            "A major change greatly helped."
        );
    }

    // ========== Whitelist Interaction ==========

    #[test]
    fn test_protected_terms_survive() {
        let out = eliminate(
            "The doctor and nurse demonstrated significant improvements in patient care. Furthermore, the surgeon utilized advanced techniques.",
        );
        assert_eq!(
            out,
            "The doctor and nurse showed major improvements in patient care. Also, the surgeon used advanced techniques."
        );
    }

    #[test]
    fn test_protected_word_after_hedge_only_gains_a_capital() {
        assert_eq!(
            eliminate("Needless to say, doctors agree."),
            "Doctors agree."
        );
        assert_eq!(
            eliminate("We saw that it should be noted that patients recovered."),
            "We saw that patients recovered."
        );
    }

    #[test]
    fn test_no_match_is_noop() {
        let text = "Plain words with nothing to change.";
        assert_eq!(eliminate(text), text);
    }

    #[test]
    fn test_rules_iterates_all_tables_in_order() {
        let eliminator = PatternEliminator::new().unwrap();
        let total = CONNECTIVES.len() + HEDGES.len() + CONTRACTIONS.len() + VOCABULARY.len();
        assert_eq!(eliminator.rules().count(), total);
        let first = eliminator.rules().next().unwrap();
        assert!(first.pattern().contains("furthermore"));
    }
}
