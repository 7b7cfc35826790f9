//! JD Parser — pulls best-guess job fields out of a pasted job description.
//!
//! Every field has its own heuristic returning `Option<String>`; `extract_fields`
//! runs them all over one `CleanedJd` and merges the hits. Pure and total: no I/O,
//! no panics, same input → same output.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::job::ExtractedFields;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in JD pattern must compile")
}

static ROLE_LINE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)job title|position"));
static ROLE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:job title|position)\s*[:\-]\s*"));
static HIRING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)^(?:hiring for|we are hiring for|we are hiring)\s*"));
static ROLE_AT_CLAUSE: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+at\s+[A-Z]"));

static COMPANY_LINE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^company\s*[:\-]"));
static COMPANY_AT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bat\s+([A-Z][A-Za-z0-9&().,\- ]{2,59})"));

// `\d` is Unicode-aware in `regex`; only ASCII digits count as numbers here.
static YOE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)([0-9]+)\s*-\s*([0-9]+)\s*(?:years?|yrs?|yr)"));
static YOE_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)([0-9]+)\+?\s*(?:years?|yrs?|yr)"));

static PAY_CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)(?:₹|rs\.?|inr|usd|\$)\s?[0-9.,]+(?:\s*-\s*[0-9.,]+)?\s*(?:lpa|pa|per annum|month|mo)?",
    )
});
static PAY_LPA: LazyLock<Regex> = LazyLock::new(|| compile(r"[0-9.,]+\s*(?:lpa|LPA)"));

static LINK: LazyLock<Regex> = LazyLock::new(|| compile(r"https?://\S+"));

/// Job boards recognised by substring, in priority order.
const SOURCES: &[(&[&str], &str)] = &[
    (&["linkedin"], "LinkedIn"),
    (&["naukri"], "Naukri"),
    (&["wellfound", "angel.co"], "WellFound"),
    (&["instahyre"], "Instahyre"),
];

/// Normalised views over the raw paste shared by all heuristics.
#[derive(Debug, Clone)]
pub struct CleanedJd {
    /// Full text with `\n` line endings.
    pub text: String,
    /// Trimmed, non-empty lines.
    pub lines: Vec<String>,
    pub lower: String,
}

impl CleanedJd {
    pub fn new(raw: &str) -> Self {
        let text = raw.replace("\r\n", "\n").replace('\r', "\n");
        let lines = text
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        let lower = text.to_lowercase();
        Self { text, lines, lower }
    }
}

/// Extracts every field it can find. Missing fields stay `None` so callers can
/// merge without clobbering values the user already typed.
pub fn extract_fields(raw: &str) -> ExtractedFields {
    let jd = CleanedJd::new(raw);

    ExtractedFields {
        role: extract_role(&jd),
        company: extract_company(&jd),
        yoe: extract_yoe(&jd),
        pay: extract_pay(&jd),
        source: extract_source(&jd),
        link: extract_link(&jd),
    }
}

/// Title line (or first line), minus label, recruiting phrase and any " at Company" tail.
pub fn extract_role(jd: &CleanedJd) -> Option<String> {
    let line = jd
        .lines
        .iter()
        .find(|l| ROLE_LINE.is_match(l))
        .or_else(|| jd.lines.first())?;

    let role = ROLE_LABEL.replace(line, "");
    let role = HIRING_PREFIX.replace(&role, "");
    let role = match ROLE_AT_CLAUSE.find(&role) {
        Some(m) => &role[..m.start()],
        None => &role[..],
    };

    non_empty(role.trim())
}

/// A `Company:` line wins; otherwise the first capitalised phrase after "at".
pub fn extract_company(jd: &CleanedJd) -> Option<String> {
    if let Some(line) = jd.lines.iter().find(|l| COMPANY_LINE.is_match(l)) {
        let value = line
            .find([':', '-'])
            .map(|idx| &line[idx + 1..])
            .unwrap_or_default();
        return non_empty(value.trim());
    }

    let caps = COMPANY_AT.captures(&jd.text)?;
    let name = caps.get(1)?.as_str();
    // stop at the end of the sentence the name sits in
    let name = match name.find(". ") {
        Some(idx) => &name[..idx],
        None => name,
    };
    non_empty(name.trim_end_matches(['.', ',', '-', ' ']).trim())
}

/// `"3-5"` for a range, `"2"` for `2+ years`. Ranges take priority.
pub fn extract_yoe(jd: &CleanedJd) -> Option<String> {
    if let Some(caps) = YOE_RANGE.captures(&jd.text) {
        return Some(format!("{}-{}", &caps[1], &caps[2]));
    }
    YOE_SINGLE
        .captures(&jd.text)
        .map(|caps| caps[1].to_string())
}

/// Verbatim pay text; currency and units are not normalised.
pub fn extract_pay(jd: &CleanedJd) -> Option<String> {
    PAY_CURRENCY
        .find(&jd.text)
        .or_else(|| PAY_LPA.find(&jd.text))
        .and_then(|m| non_empty(m.as_str().trim()))
}

pub fn extract_source(jd: &CleanedJd) -> Option<String> {
    SOURCES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| jd.lower.contains(n)))
        .map(|(_, label)| label.to_string())
}

/// First http(s) URL, with a single trailing `)`, `.` or `,` removed.
pub fn extract_link(jd: &CleanedJd) -> Option<String> {
    let url = LINK.find(&jd.text)?.as_str();
    let url = url
        .strip_suffix([')', '.', ','])
        .unwrap_or(url);
    non_empty(url)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
