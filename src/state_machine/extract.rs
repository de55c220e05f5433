//! Explicit-only field extraction from user text
//!
//! Every extractor returns [`Extracted::Absent`] unless the value is literally
//! present in the text. The only context used is which field the user is
//! currently being asked about, so a bare answer like `50` or `Brazil` can be
//! read as the daily budget or the geo.

use super::state::{Confirmation, CreativeMode, Field};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Outcome of looking for one field in a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    /// The text does not state this field
    Absent,
    /// The text states a usable value
    Found(T),
    /// The text states something for this field that cannot be used as-is
    Malformed { raw: String, reason: &'static str },
}

impl<T> Extracted<T> {
    fn malformed(raw: impl Into<String>, reason: &'static str) -> Self {
        Extracted::Malformed {
            raw: raw.into(),
            reason,
        }
    }
}

/// A value the user supplied that could not be accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: Field,
    pub raw: String,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(field: Field, raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Patterns
// ============================================================================

const TIME_VALUE: &str = r"(\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2})?(?:Z|[+-]\d{2}:?\d{2})?)?|(?i:today|tomorrow|now|immediately|asap|(?:next\s+)?(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)))";

static OBJECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(awareness|traffic|engagement|leads?|app\s+promotion|sales)\b")
        .expect("objective pattern")
});

static GEO_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[Gg]eo|GEO|[Cc]ountr(?:y|ies)|[Rr]egion|[Tt]argeting|[Tt]arget)\b\s*(?:is\s+|to\s+|:|=)?\s*(?:the\s+)?([A-Z][A-Za-z]*(?:\s+[A-Z][A-Za-z]*)*)",
    )
    .expect("geo marker pattern")
});

static GEO_KNOWN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(United States|United Kingdom|North America|South America|Latin America|USA|US|UK|EU|Canada|Mexico|Brazil|Argentina|India|Germany|France|Spain|Italy|Netherlands|Japan|Australia|Europe|LATAM|APAC|EMEA|Worldwide|Global)\b",
    )
    .expect("known geo pattern")
});

static BUDGET_RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\$?\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:usd|dollars?|eur|euros?|€)?\s*(?:/\s*day\b|per\s+day\b|a\s+day\b|each\s+day\b|daily\b|/d\b)",
    )
    .expect("budget rate pattern")
});

static BUDGET_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbudget\b[^0-9\n]{0,24}?\$?\s*([0-9][0-9,]*(?:\.[0-9]+)?)")
        .expect("budget keyword pattern")
});

static BUDGET_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bbudget\b|/\s*day\b|\bper\s+day\b").expect("budget mention pattern")
});

static BARE_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\$?\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:usd|dollars?|eur|euros?|€)?\s*[.!]?\s*$")
        .expect("bare amount pattern")
});

static START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i:\b(?:start(?:s|ing)?|begin(?:s|ning)?|launch(?:es|ing)?|go(?:es)?\s+live|from)\b(?:\s+(?:on|at|from))?)\s+{TIME_VALUE}\b"
    ))
    .expect("start time pattern")
});

static END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i:\b(?:end(?:s|ing)?|until|till|through|stop(?:s|ping)?)\b(?:\s+(?:on|at|by))?)\s+{TIME_VALUE}\b"
    ))
    .expect("end time pattern")
});

static BARE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b{TIME_VALUE}\b")).expect("bare time pattern"));

static GENERATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:generate[ds]?|generation|ai[- ]generated|(?:create|make)\s+(?:them|some|creatives)\s+for\s+me)\b",
    )
    .expect("generate mode pattern")
});

static USER_PROVIDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:user[_ ]provided|my\s+own|i'?ll\s+(?:provide|upload)|i\s+will\s+(?:provide|upload)|upload(?:ed)?|provided)\b",
    )
    .expect("user provided mode pattern")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"'()\[\],]+"#).expect("url pattern")
});

static FINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:final|finali[sz]e[ds]?|confirm(?:ed|s)?|lock(?:ed)?\s+(?:it\s+|them\s+)?in|go\s+with|that'?s\s+it|done)\b",
    )
    .expect("final signal pattern")
});

// Whole words only; an apostrophe joins a word, so "y'know" and "no'" never count
static YES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\w'])(?:yes|yep|yeah)(?:$|[^\w'])").expect("yes pattern")
});

static NO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^\w'])(?:no|nope)(?:$|[^\w'])").expect("no pattern")
});

static THOUSANDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,3}(?:,[0-9]{3})+$").expect("thousands pattern"));

static ALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\ball\b").expect("all pattern"));

static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:#|\b(?:option|creative|number|image|no\.)\s*#?)\s*([0-9]+)")
        .expect("ordinal pattern")
});

static ORDINAL_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(first|second|third|fourth|fifth)\b").expect("ordinal word pattern")
});

static BARE_NUMBER_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*[0-9]+(?:\s*(?:,|and|&)\s*[0-9]+)*\s*[.!]?\s*$")
        .expect("bare number list pattern")
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern"));

// ============================================================================
// Stage 1 - CAMPAIGN_INFO
// ============================================================================

/// Campaign-info fields found in one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignInfoFields {
    pub objective: Extracted<String>,
    pub geo: Extracted<String>,
    pub daily_budget: Extracted<u64>,
    pub start_time: Extracted<String>,
    pub end_time: Extracted<String>,
}

/// Extract every campaign-info field stated in `text`
pub fn campaign_info(text: &str, answering: Option<Field>) -> CampaignInfoFields {
    CampaignInfoFields {
        objective: objective(text),
        geo: geo(text, answering == Some(Field::Geo)),
        daily_budget: daily_budget(text, answering == Some(Field::DailyBudget)),
        start_time: start_time(text, answering == Some(Field::StartTime)),
        end_time: end_time(text),
    }
}

fn canonical_objective(raw: &str) -> &'static str {
    let lowered = raw.to_ascii_lowercase();
    match lowered.split_whitespace().next().unwrap_or_default() {
        "awareness" => "Awareness",
        "traffic" => "Traffic",
        "engagement" => "Engagement",
        "lead" | "leads" => "Leads",
        "app" => "App Promotion",
        _ => "Sales",
    }
}

/// Objective from the closed set; two different objectives in one input is malformed
pub fn objective(text: &str) -> Extracted<String> {
    let mut found: Option<&'static str> = None;
    for m in OBJECTIVE_RE.find_iter(text) {
        let canonical = canonical_objective(m.as_str());
        match found {
            None => found = Some(canonical),
            Some(existing) if existing != canonical => {
                return Extracted::malformed(text.trim(), "more than one objective was named");
            }
            Some(_) => {}
        }
    }
    found.map_or(Extracted::Absent, |o| Extracted::Found(o.to_string()))
}

fn is_objective_word(candidate: &str) -> bool {
    OBJECTIVE_RE
        .find(candidate)
        .is_some_and(|m| m.as_str().len() == candidate.len())
}

/// Geo as stated: after an explicit marker, a known region name, or a
/// capitalized short answer to the geo question
pub fn geo(text: &str, answering: bool) -> Extracted<String> {
    for caps in GEO_MARKER_RE.captures_iter(text) {
        if let Some(m) = caps.get(1) {
            let candidate = m.as_str().trim();
            if !candidate.is_empty() && !is_objective_word(candidate) {
                return Extracted::Found(candidate.to_string());
            }
        }
    }

    if let Some(m) = GEO_KNOWN_RE.find(text) {
        return Extracted::Found(m.as_str().to_string());
    }

    if answering {
        let answer = text.trim().trim_end_matches(['.', '!']);
        let words: Vec<&str> = answer.split_whitespace().collect();
        let proper_noun_phrase = !words.is_empty()
            && words.len() <= 4
            && words.iter().all(|w| {
                w.chars().next().is_some_and(char::is_uppercase)
                    && w.chars().all(|c| c.is_alphabetic() || c == '-')
            });
        if proper_noun_phrase {
            return Extracted::Found(words.join(" "));
        }
    }

    Extracted::Absent
}

fn followed_by_date_part(text: &str, end: usize) -> bool {
    let mut rest = text.get(end..).unwrap_or_default().chars();
    matches!(rest.next(), Some('-' | ':')) && rest.next().is_some_and(|c| c.is_ascii_digit())
}

fn parse_amount(raw: &str) -> Extracted<u64> {
    // A trailing comma is punctuation, not a separator
    let raw = raw.trim_end_matches(',');
    if raw.contains('.') {
        return Extracted::malformed(raw, "daily budget must be a whole number");
    }
    if raw.contains(',') && !THOUSANDS_RE.is_match(raw) {
        return Extracted::malformed(raw, "commas are only allowed as thousands separators");
    }
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    match digits.parse::<u64>() {
        Ok(0) => Extracted::malformed(raw, "daily budget must be greater than zero"),
        Ok(amount) => Extracted::Found(amount),
        Err(_) => Extracted::malformed(raw, "daily budget is not a valid number"),
    }
}

/// Integer daily budget; currency markers are ignored, never converted
pub fn daily_budget(text: &str, answering: bool) -> Extracted<u64> {
    if let Some(m) = BUDGET_RATE_RE.captures(text).and_then(|caps| caps.get(1)) {
        return parse_amount(m.as_str());
    }

    for caps in BUDGET_KEYWORD_RE.captures_iter(text) {
        if let Some(m) = caps.get(1) {
            if !followed_by_date_part(text, m.end()) {
                return parse_amount(m.as_str());
            }
        }
    }

    if answering {
        if let Some(m) = BARE_AMOUNT_RE.captures(text).and_then(|caps| caps.get(1)) {
            return parse_amount(m.as_str());
        }
    }

    if BUDGET_MENTION_RE.is_match(text) || (answering && !text.trim().is_empty()) {
        return Extracted::malformed(text.trim(), "no whole-number daily budget found");
    }

    Extracted::Absent
}

/// Start time copied verbatim; a bare timestamp counts only when answering
pub fn start_time(text: &str, answering: bool) -> Extracted<String> {
    if let Some(m) = START_RE.captures(text).and_then(|caps| caps.get(1)) {
        return Extracted::Found(m.as_str().to_string());
    }

    if answering {
        let end_span = END_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.range());
        let bare = BARE_TIME_RE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .find(|m| end_span.as_ref() != Some(&m.range()));
        if let Some(m) = bare {
            return Extracted::Found(m.as_str().to_string());
        }
    }

    Extracted::Absent
}

/// Optional end time copied verbatim
pub fn end_time(text: &str) -> Extracted<String> {
    END_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(Extracted::Absent, |m| Extracted::Found(m.as_str().to_string()))
}

// ============================================================================
// Stage 2 - CREATIVE
// ============================================================================

/// Creative mode from the two literal tokens or their synonyms
pub fn creative_mode(text: &str, answering: bool) -> Extracted<CreativeMode> {
    let generate = GENERATE_RE.is_match(text);
    let provided = USER_PROVIDED_RE.is_match(text);
    match (generate, provided) {
        (true, false) => Extracted::Found(CreativeMode::Generate),
        (false, true) => Extracted::Found(CreativeMode::UserProvided),
        (true, true) => Extracted::malformed(text.trim(), "both GENERATE and USER_PROVIDED were mentioned"),
        (false, false) if answering && !text.trim().is_empty() => {
            Extracted::malformed(text.trim(), "expected GENERATE or USER_PROVIDED")
        }
        (false, false) => Extracted::Absent,
    }
}

/// Absolute http(s) URLs in order of appearance, copied verbatim
pub fn urls(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ';', ':', '!', '?']))
        .filter(|candidate| {
            url::Url::parse(candidate).is_ok_and(|parsed| {
                matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
            })
        })
        .map(str::to_string)
        .collect()
}

/// Explicit "these are final" signal
pub fn final_signal(text: &str) -> bool {
    FINAL_RE.is_match(text)
}

fn ordinal_word_index(word: &str) -> usize {
    match word.to_ascii_lowercase().as_str() {
        "first" => 1,
        "second" => 2,
        "third" => 3,
        "fourth" => 4,
        _ => 5,
    }
}

/// Creatives the user picked out of `candidates`, by URL, ordinal, or `all`
pub fn selection(text: &str, candidates: &[String]) -> Extracted<Vec<String>> {
    let mentioned = urls(text);
    if !mentioned.is_empty() {
        if let Some(unknown) = mentioned.iter().find(|u| !candidates.contains(u)) {
            return Extracted::malformed(unknown.clone(), "not one of the generated creatives");
        }
        return Extracted::Found(dedup(mentioned));
    }

    if ALL_RE.is_match(text) {
        return Extracted::Found(candidates.to_vec());
    }

    let mut ordinals: Vec<usize> = Vec::new();
    if BARE_NUMBER_LIST_RE.is_match(text) {
        ordinals.extend(
            NUMBER_RE
                .find_iter(text)
                .filter_map(|m| m.as_str().parse::<usize>().ok()),
        );
    } else {
        ordinals.extend(
            ORDINAL_RE
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .filter_map(|m| m.as_str().parse::<usize>().ok()),
        );
        ordinals.extend(
            ORDINAL_WORD_RE
                .find_iter(text)
                .map(|m| ordinal_word_index(m.as_str())),
        );
    }

    if ordinals.is_empty() {
        return Extracted::Absent;
    }

    let mut picked = Vec::with_capacity(ordinals.len());
    for ordinal in ordinals {
        match ordinal.checked_sub(1).and_then(|i| candidates.get(i)) {
            Some(url) => picked.push(url.clone()),
            None => {
                return Extracted::malformed(
                    ordinal.to_string(),
                    "no generated creative with that number",
                );
            }
        }
    }
    Extracted::Found(dedup(picked))
}

fn dedup(urls: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(urls.len());
    for url in urls {
        if !seen.contains(&url) {
            seen.push(url);
        }
    }
    seen
}

// ============================================================================
// Stage 3 - LAUNCHING
// ============================================================================

/// YES/NO tokens only; both in one input is malformed
pub fn confirmation(text: &str) -> Extracted<Confirmation> {
    match (YES_RE.is_match(text), NO_RE.is_match(text)) {
        (true, false) => Extracted::Found(Confirmation::Yes),
        (false, true) => Extracted::Found(Confirmation::No),
        (true, true) => Extracted::malformed(text.trim(), "both YES and NO were given"),
        (false, false) => Extracted::Absent,
    }
}

/// Plain "yes" used to answer an "are these final" question
pub fn affirmative(text: &str) -> bool {
    matches!(confirmation(text), Extracted::Found(Confirmation::Yes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_sentence_fills_campaign_info() {
        let fields = campaign_info(
            "Traffic campaign targeting US with $50/day starting tomorrow",
            Some(Field::Objective),
        );
        assert_eq!(fields.objective, Extracted::Found("Traffic".to_string()));
        assert_eq!(fields.geo, Extracted::Found("US".to_string()));
        assert_eq!(fields.daily_budget, Extracted::Found(50));
        assert_eq!(fields.start_time, Extracted::Found("tomorrow".to_string()));
        assert_eq!(fields.end_time, Extracted::Absent);
    }

    #[test]
    fn test_objective_canonicalized() {
        assert_eq!(objective("we want leads"), Extracted::Found("Leads".to_string()));
        assert_eq!(
            objective("App Promotion please"),
            Extracted::Found("App Promotion".to_string())
        );
        assert_eq!(objective("hello"), Extracted::Absent);
        assert!(matches!(
            objective("traffic or sales"),
            Extracted::Malformed { .. }
        ));
    }

    #[test]
    fn test_geo_requires_explicit_statement() {
        assert_eq!(geo("target Canada", false), Extracted::Found("Canada".to_string()));
        assert_eq!(
            geo("run it in the United Kingdom", false),
            Extracted::Found("United Kingdom".to_string())
        );
        // Pronoun "us" is not a country code
        assert_eq!(geo("help us out", false), Extracted::Absent);
        assert_eq!(geo("Latin America", true), Extracted::Found("Latin America".to_string()));
        assert_eq!(geo("Peru", false), Extracted::Absent);
        assert_eq!(geo("Peru", true), Extracted::Found("Peru".to_string()));
        assert_eq!(geo("i don't know", true), Extracted::Absent);
    }

    #[test]
    fn test_budget_parsing() {
        assert_eq!(daily_budget("$1,500 per day", false), Extracted::Found(1500));
        assert_eq!(daily_budget("budget is 80", false), Extracted::Found(80));
        assert_eq!(daily_budget("75", true), Extracted::Found(75));
        assert_eq!(daily_budget("75", false), Extracted::Absent);
        assert!(matches!(
            daily_budget("$50.50/day", false),
            Extracted::Malformed { .. }
        ));
        assert!(matches!(
            daily_budget("budget of fifty dollars", false),
            Extracted::Malformed { .. }
        ));
        assert!(matches!(daily_budget("0 per day", false), Extracted::Malformed { .. }));
        assert!(matches!(daily_budget("fifty", true), Extracted::Malformed { .. }));
        assert_eq!(daily_budget("1,500", true), Extracted::Found(1500));
        assert_eq!(daily_budget("budget 2,000,000", false), Extracted::Found(2_000_000));
        assert_eq!(daily_budget("budget 30, starting today", false), Extracted::Found(30));
    }

    #[test]
    fn test_budget_rejects_misplaced_commas() {
        assert!(matches!(
            daily_budget("budget 1,5", false),
            Extracted::Malformed { .. }
        ));
        assert!(matches!(
            daily_budget("30,50/day", false),
            Extracted::Malformed { .. }
        ));
        assert!(matches!(daily_budget("12,34,567", true), Extracted::Malformed { .. }));
    }

    #[test]
    fn test_budget_ignores_dates() {
        assert!(matches!(
            daily_budget("budget starting 2026-11-01", false),
            Extracted::Malformed { .. }
        ));
    }

    #[test]
    fn test_times_copied_verbatim() {
        assert_eq!(
            start_time("start on 2026-11-01T09:00:00Z", false),
            Extracted::Found("2026-11-01T09:00:00Z".to_string())
        );
        assert_eq!(start_time("2026-11-01", false), Extracted::Absent);
        assert_eq!(
            start_time("2026-11-01", true),
            Extracted::Found("2026-11-01".to_string())
        );
        assert_eq!(
            end_time("run until 2026-12-01"),
            Extracted::Found("2026-12-01".to_string())
        );
        assert_eq!(
            start_time("until 2026-12-01", true),
            Extracted::Absent
        );
    }

    #[test]
    fn test_creative_mode_tokens() {
        assert_eq!(creative_mode("GENERATE", false), Extracted::Found(CreativeMode::Generate));
        assert_eq!(
            creative_mode("USER_PROVIDED", false),
            Extracted::Found(CreativeMode::UserProvided)
        );
        assert_eq!(
            creative_mode("I'll upload my own", false),
            Extracted::Found(CreativeMode::UserProvided)
        );
        assert_eq!(creative_mode("banana", false), Extracted::Absent);
        assert!(matches!(creative_mode("banana", true), Extracted::Malformed { .. }));
    }

    #[test]
    fn test_urls_validated_and_trimmed() {
        let found = urls("use https://cdn.example.com/a.png, and http://x.io/b.jpg. not ftp://c");
        assert_eq!(found, vec!["https://cdn.example.com/a.png", "http://x.io/b.jpg"]);
        assert!(urls("https://").is_empty());
    }

    #[test]
    fn test_selection_by_ordinal_url_and_all() {
        let candidates = vec![
            "https://cdn.demo.com/generated_creative_1.png".to_string(),
            "https://cdn.demo.com/generated_creative_2.png".to_string(),
            "https://cdn.demo.com/generated_creative_3.png".to_string(),
        ];
        assert_eq!(
            selection("1, 3", &candidates),
            Extracted::Found(vec![candidates[0].clone(), candidates[2].clone()])
        );
        assert_eq!(
            selection("go with #2", &candidates),
            Extracted::Found(vec![candidates[1].clone()])
        );
        assert_eq!(
            selection("the second one", &candidates),
            Extracted::Found(vec![candidates[1].clone()])
        );
        assert_eq!(selection("use all of them", &candidates), Extracted::Found(candidates.clone()));
        assert!(matches!(selection("#7", &candidates), Extracted::Malformed { .. }));
        assert!(matches!(
            selection("https://elsewhere.com/x.png", &candidates),
            Extracted::Malformed { .. }
        ));
        assert_eq!(selection("hmm", &candidates), Extracted::Absent);
    }

    #[test]
    fn test_confirmation_tokens_only() {
        assert_eq!(confirmation("Yes"), Extracted::Found(Confirmation::Yes));
        assert_eq!(confirmation("no, wait"), Extracted::Found(Confirmation::No));
        assert_eq!(confirmation("sure thing"), Extracted::Absent);
        assert!(matches!(confirmation("yes no"), Extracted::Malformed { .. }));
        assert_eq!(confirmation("yeah."), Extracted::Found(Confirmation::Yes));
        assert_eq!(confirmation("NO"), Extracted::Found(Confirmation::No));
    }

    #[test]
    fn test_stray_letters_are_not_confirmation() {
        assert_eq!(confirmation("y'know, show me the summary"), Extracted::Absent);
        assert_eq!(confirmation("y"), Extracted::Absent);
        assert_eq!(confirmation("n"), Extracted::Absent);
        assert_eq!(confirmation("I know, nothing yet"), Extracted::Absent);
        assert_eq!(confirmation("we don't know"), Extracted::Absent);
    }
}
