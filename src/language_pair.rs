/// Language pair data and URL query handling
use serde::{Deserialize, Serialize};
use url::Url;

pub const SOURCE_PARAM: &str = "sl";
pub const TARGET_PARAM: &str = "tl";

/// A source/target language combination saved as a quick link.
///
/// Identity is the `(sl, tl)` pair itself. Either code may be absent when the
/// host page omitted the query parameter; absent codes persist as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguagePair {
    #[serde(default)]
    pub sl: Option<String>,
    #[serde(default)]
    pub tl: Option<String>,
}

impl LanguagePair {
    pub fn new(sl: &str, tl: &str) -> LanguagePair {
        LanguagePair {
            sl: Some(sl.to_string()),
            tl: Some(tl.to_string()),
        }
    }

    /// Read the pair the page is currently showing from its `sl`/`tl` query parameters
    pub fn from_url(url: &str) -> Option<LanguagePair> {
        let parsed = Url::parse(url).ok()?;
        let param = |name: &str| {
            parsed
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        Some(LanguagePair {
            sl: param(SOURCE_PARAM),
            tl: param(TARGET_PARAM),
        })
    }

    /// Chip text, e.g. `en:fr`
    pub fn label(&self) -> String {
        format!(
            "{}:{}",
            self.sl.as_deref().unwrap_or_default(),
            self.tl.as_deref().unwrap_or_default()
        )
    }

    /// Rewrite `sl` and `tl` in `url`, leaving every other parameter in place.
    ///
    /// Follows `URLSearchParams.set`: the first occurrence is replaced where it
    /// stands, later occurrences are dropped, and a missing key is appended.
    pub fn apply_to_url(&self, url: &str) -> Option<String> {
        let mut parsed = Url::parse(url).ok()?;
        let mut pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        set_param(&mut pairs, SOURCE_PARAM, self.sl.as_deref().unwrap_or_default());
        set_param(&mut pairs, TARGET_PARAM, self.tl.as_deref().unwrap_or_default());

        parsed.query_pairs_mut().clear().extend_pairs(pairs.iter());
        Some(parsed.to_string())
    }
}

fn set_param(pairs: &mut Vec<(String, String)>, name: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(key, current)| {
        if key != name {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        *current = value.to_string();
        true
    });

    if !seen {
        pairs.push((name.to_string(), value.to_string()));
    }
}
