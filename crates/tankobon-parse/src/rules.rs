//! Ordered regex rule tables.
//!
//! Every table is tried top to bottom and the first rule whose named group
//! participates in a match wins, so the order inside each table is part of
//! its meaning. Rules compile case-insensitively under a backtrack limit;
//! a rule that exceeds the limit is treated as not matching.

use std::sync::LazyLock;

use fancy_regex::{Captures, Regex, RegexBuilder};

use crate::error::ParseError;

/// Backtracking budget for a single rule evaluation.
pub const BACKTRACK_LIMIT: usize = 1_000_000;

/// A compiled case-insensitive rule.
#[derive(Debug, Clone)]
pub struct Rule(Regex);

/// Value of a named group from the first match where it participated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'t> {
    pub value: &'t str,
    /// Whether the optional `Part` group (e.g. the `b` in `153b`) matched too.
    pub has_part: bool,
}

impl Rule {
    fn compile(pattern: &str, limit: usize) -> Result<Self, fancy_regex::Error> {
        RegexBuilder::new(&format!("(?i){pattern}"))
            .backtrack_limit(limit)
            .build()
            .map(Self)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text).unwrap_or(false)
    }

    /// Text of the first match, if any.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.0.find(text).ok().flatten().map(|m| m.as_str())
    }

    /// All successive matches. Stops quietly at the first engine error.
    pub fn captures<'r, 't>(&'r self, text: &'t str) -> impl Iterator<Item = Captures<'t>> + 'r
    where
        't: 'r,
    {
        self.0.captures_iter(text).map_while(Result::ok)
    }

    /// First match (in scan order) where group `name` participated.
    pub fn first_group<'t>(&self, text: &'t str, name: &str) -> Option<Hit<'t>> {
        self.captures(text).find_map(|caps| {
            caps.name(name).map(|m| Hit {
                value: m.as_str(),
                has_part: caps.name("Part").is_some(),
            })
        })
    }

    /// Removes every non-overlapping match. On an engine error the rest of
    /// the text is kept as is.
    pub fn remove_all(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.0.find_iter(text) {
            let Ok(m) = m else { break };
            out.push_str(&text[last..m.start()]);
            last = m.end();
        }
        out.push_str(&text[last..]);
        out
    }

    fn has_group(&self, name: &str) -> bool {
        self.0.capture_names().flatten().any(|n| n == name)
    }
}

fn rules(patterns: &[&str]) -> Vec<Rule> {
    patterns
        .iter()
        .map(|p| Rule::compile(p, BACKTRACK_LIMIT).unwrap())
        .collect()
}

fn rule(pattern: &str) -> Rule {
    Rule::compile(pattern, BACKTRACK_LIMIT).unwrap()
}

// ── Volume tables ───────────────────────────────────────────────

pub static MANGA_VOLUME: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        // เล่ม 5
        r"(เล่ม|เล่มที่)(\s)?(\.?)(\s|_)?(?P<Volume>\d+(-\d+)?(\.\d+)?)",
        // Series v16-17
        r"(?P<Series>.*)(\b|_)v(?P<Volume>\d+-?\d+)( |_)",
        // Series - Vol. 30 Ch. 187.5
        r"^(?P<Series>.+?)(\s*Chapter\s*\d+)?(\s|_|-\s)+(Vol(ume)?\.?(\s|_)?)(?P<Volume>\d+(\.\d+)?)(.+?|$)",
        // Series_v11_c90-98
        r"(?P<Series>.*)(\b|_)(?!\[)v(?P<Volume>\d+(\.\d)?(-\d+(\.\d)?)?)(?!\])",
        // Series vol. 10, Vol. 20.5-21.5
        r"(?P<Series>.*)(\b|_)(vol\.? ?)(?P<Volume>\d+(\.\d)?(-\d+)?(\.\d)?)",
        r"(vol\.? ?)(?P<Volume>\d+(\.\d)?)",
        // [Volume 11]
        r"(volume )(?P<Volume>\d+(\.\d)?)",
        // Series S01 014
        r"(?P<Series>.*)(\b|_|)(S(?P<Volume>\d+))",
        // vol_001-1
        r"(vol_)(?P<Volume>\d+(\.\d)?)",
        // 第03卷, 第1册
        r"第(?P<Volume>\d+)(卷|册)",
        r"(卷|册)(?P<Volume>\d+)",
        // 63권, 제1화
        r"제?(?P<Volume>\d+(\.\d)?)(권|회|화|장)",
        // 시즌3
        r"시즌(?P<Volume>\d+-?\d+)",
        r"(?P<Volume>\d+(-|~)?\d+?)시즌",
        r"시즌(?P<Volume>\d+(-|~)?\d+?)",
        // 12巻
        r"(?P<Volume>\d+(?:(-)\d+)?)巻",
        // Том 1, Тома 1
        r"Том(а?)(\.?)(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)",
        r"(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)(\s|_)Том(а?)",
    ])
});

pub static COMIC_VOLUME: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        r"(เล่ม|เล่มที่)(\s)?(\.?)(\s|_)?(?P<Volume>\d+(-\d+)?(\.\d+)?)",
        // Teen Titans v1 001
        r"^(?P<Series>.+?)(?: |_)(t|v)(?P<Volume>\d+(\.\d)?(-\d+(\.\d)?)?)",
        // Batgirl Vol.2000 #57
        r"^(?P<Series>.+?)(?:\s|_)(v|vol|tome|t)\.?(\s|_)?(?P<Volume>\d+)",
        r"第(?P<Volume>\d+)(卷|册)",
        r"(卷|册)(?P<Volume>\d+)",
        r"제?(?P<Volume>\d+)권",
        r"(?P<Volume>\d+(?:(-)\d+)?)巻",
        r"Том(а?)(\.?)(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)",
        r"(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)(\s|_)Том(а?)",
    ])
});

// ── Series tables ───────────────────────────────────────────────

pub static MANGA_SERIES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        r"(?P<Series>.+?)(เล่ม|เล่มที่)(\s)?(\.?)(\s|_)?(?P<Volume>\d+(-\d+)?(\.\d+)?)",
        r"(?P<Series>.+?)Том(а?)(\.?)(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)",
        r"(?P<Series>.+?)(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)(\s|_)Том(а?)",
        r"(?P<Series>.+?)(?!Том)(?<!Том\.)\s\d+(\s|_)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(\s|_)(Глава|глава|Главы|Глава)",
        r"(?P<Series>.+?)(Глава|глава|Главы|Глава)(\.?)(\s|_)?(?P<Chapter>\d+(?:.\d+|-\d+)?)",
        // Grand Blue Dreaming - SP02
        r"(?P<Series>.*)(\b|_|-|\s)(?:sp)\d",
        // Series - Volume 005 - Chapter 026
        r"(?P<Series>.+?)(\s|_|-)+(?:Vol(ume|\.)?(\s|_|-)+\d+)(\s|_|-)+(?:(Ch|Chapter|Ch)\.?)(\s|_|-)+(?P<Chapter>\d+)",
        // NEEDLESS_Vol.2_-_Disk, Series - Vol.tbd Chapter 27.001
        r"^(?P<Series>.+?)(?:\s*|_|-\s*)+(?:Ch(?:apter|\.|)\s*\d+(?:\.\d+)?(?:\s*|_|-\s*)+)?Vol(?:ume|\.|)\s*(?:\d+|tbd)(?:\s|_|-\s*).+",
        // Series_v04_ch34, VanDread-v01-c01
        r"(?P<Series>.*)(\b|_)v(?P<Volume>\d+-?\d*)(\s|_|-)",
        // Series - c001-008 (v01)
        r"(?P<Series>.+?)( - )(?:v|vo|c|chapters)\d",
        // Series, Chapter 19
        r"(?P<Series>.*)(?:, Chapter )(?P<Chapter>\d+)",
        // Series - Chapter 038.5 - Volume Announcement
        r"(?P<Series>.+?)(\s|_|-)(?!Vol)(\s|_|-)((?:Chapter)|(?:Ch\.))(\s|_|-)(?P<Chapter>\d+)",
        // Series - Digital Colored Comics Vol. 20 Ch. 177
        r"(?P<Series>.+?):? (\b|_|-)(vol)\.?(\s|-|_)?\d+",
        // Series Chapter 001 Volume 1
        r"(?P<Series>.+?):?(\s|\b|_|-)Chapter(\s|\b|_|-)\d+(\s|\b|_|-)(vol)(ume)",
        r"(?P<Series>.+?):? (\b|_|-)(vol)(ume)",
        // Series c000 (S2 LE BD Omake)
        r"(?P<Series>.*)(\bc\d+\b)",
        // Series [Volume 11], Series - Volume 01
        r"(?P<Series>.*)(?: _|-|\[|\()\s?vol(ume)?",
        // Series - Chapter 027 Title, Series - SP02 Extra
        r"^(?P<Series>(?!Vol).+?)(?:(ch(apter|\.)(\b|_|-|\s))|sp)\d",
        // Series_v11_c90-98, Series Vol. 0001 Ch. 0001
        r"(?P<Series>.*) (\b|_|-)(v|ch\.?|c|s)\d+",
        // Series 018 (2019) (Digital)
        r"(?P<Series>.*)\s+(?P<Chapter>\d+)\s+(?:\(\d{4}\))\s",
        // Series 006.5 (2019)
        r"(?P<Series>.*) (-)?(?P<Chapter>\d+(?:.\d+|-\d+)?) \(\d{4}\)",
        // Series - Episode 429
        r"(?P<Series>.*)(\s|_)(?:Episode|Ep\.?)(\s|_)(?P<Chapter>\d+(?:.\d+|-\d+)?)",
        // Series (2016-2019)
        r"(?P<Series>.*)\(\d",
        // Series (Ch 59-67)
        r"(?P<Series>.*)(\s|_)\((c\s|ch\s|chapter\s)",
        // Series chapters 101-108
        r"(?P<Series>.+?)(\s|_|-)+?chapters(\s|_|-)+?\d+(\s|_|-)+?",
        // Series 001 (Digital)
        r"(?P<Series>.+?)(\s|_|-)+?\d+(\s|_|-)\(",
        // Series_v01_ch01_[Group]_v1.1 must precede the bare version form
        r"(?P<Series>.*)(v|s)\d+(-\d+)?(_|\s)",
        r"(?P<Series>.*)(v|s)\d+(-\d+)?",
        // loose
        r"(?P<Series>.*)(_)(v|vo|c|volume)( |_)\d+",
        // Series_MS_vol01_chp02
        r"(?P<Series>.*)( |_)(vol\d+)?( |_)(?:Chp\.? ?\d+)",
        r"(?P<Series>.*)( |_)(?:Chp.? ?\d+)",
        r"^(?!Vol)(?P<Series>.*)( |_)Chapter( |_)(\d+)",
        r"^(?!vol)(?P<Series>.*)( |_)(chapters( |_)?)\d+-?\d*",
        // Series - Episode 1 - Title #1
        r"^(?!Vol\.?)(?P<Series>.*)( |_|-)(?<!-)(episode|chapter|(ch\.?) ?)\d+-?\d*",
        // Series ch01-05
        r"^(?!Vol)(?P<Series>.*)ch\d+-?\d?",
        // Series - Ch.252-005
        r"(?P<Series>.*)( ?- ?)Ch\.\d+-?\d*",
        // 죠시라쿠! 2년 후 1권
        r"^(?!Vol)(?!Chapter)(?P<Series>.+?)(-|_|\s|#)\d+(-\d+)?(권|화|話)",
        // Series_Omake-1, Bleach 001-002, Kodoja #001
        r"^(?!Vol)(?!Chapter)(?P<Series>.+?)(-|_|\s|#)\d+(-\d+)?",
        // Series - 01, Beelzebub_172_RHS
        r"^(?!Vol\.?)(?!Chapter)(?P<Series>.+?)(\s|_|-)(?<!-)(ch|chapter)?\.?\d+-?\d*",
        // Series_c1, greedy so near the end
        r"^(?!Vol)(?P<Series>.*)( |_|-)(ch?)\d+",
        // Series第3巻
        r"(?P<Series>.+?)第(?P<Volume>\d+(?:(-)\d+)?)巻",
    ])
});

pub static COMIC_SERIES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        r"(?P<Series>.+?)(เล่ม|เล่มที่)(\s)?(\.?)(\s|_)?(?P<Volume>\d+(-\d+)?(\.\d+)?)",
        r"(?P<Series>.+?)Том(а?)(\.?)(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)",
        r"(?P<Series>.+?)(\s|_)?(?P<Volume>\d+(?:(-)\d+)?)(\s|_)Том(а?)",
        r"(?P<Series>.+?)(?!Том)(?<!Том\.)\s\d+(\s|_)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(\s|_)(Глава|глава|Главы|Глава)",
        r"(?P<Series>.+?)(Глава|глава|Главы|Глава)(\.?)(\s|_)?(?P<Chapter>\d+(?:.\d+|-\d+)?)",
        // Tintin - T22 Vol 714 pour Sydney
        r"(?P<Series>.+?)\s?(\b|_|-)\s?((vol|tome|t)\.?)(?P<Volume>\d+(-\d+)?)",
        // Invincible Vol 01 Family matters
        r"(?P<Series>.+?)(\b|_)((vol|tome|t)\.?)(\s|_)(?P<Volume>\d+(-\d+)?)",
        // Batman Beyond 2.0 001
        r"^(?P<Series>.+?\S\.\d) (?P<Chapter>\d+)",
        // 04 - Asterix the Gladiator (1964)
        r"^(?P<Volume>\d+)\s(-\s|_)(?P<Series>.*(\d{4})?)( |_)(\(|\d+)",
        // 01 Spider-Man & Wolverine 01
        r"^(?P<Volume>\d+)\s(?:-\s)(?P<Series>.*) (\d+)?",
        // Batman & Wildcat (1 of 3)
        r"(?P<Series>.*(\d{4})?)( |_)(?:\((?P<Volume>\d+) of \d+)",
        // Teen Titans v1 001, Aldebaran-Antares-t6
        r"^(?P<Series>.+?)(?: |_|-)(v|t)\d+",
        // Amazing Man Comics chapter 25
        r"^(?P<Series>.+?)(?: |_)c(hapter) \d+",
        // Amazing Man Comics issue #25
        r"^(?P<Series>.+?)(?: |_)i(ssue) #\d+",
        // Series - Ep. 001 - Title
        r"^(?P<Series>.+?)(\s|_|-)(?:Ep\.?)(\s|_|-)+\d+",
        // Batgirl Vol.2000 #57
        r"^(?P<Series>.+?)Vol\.?\s?#?(?:\d+)",
        // Series #0
        r"^(?P<Series>.*)(?: |_)#\d+",
        // Series 01, Series (1996) 01 - Title
        r"^(?P<Series>.+?)(?: \d+)",
        r"^(?P<Series>.+?)(?: |_)(?P<Chapter>\d+)",
        // The First Asterix Frieze (WebP by Doc MaKS)
        r"^(?P<Series>.*)(?: |_)(?!\(\d{4}|\d{4}-\d{2}\))\(",
        // spawn-123, spawn-chapter-123
        r"^(?P<Series>.+?)-(chapter-)?(?P<Chapter>\d+)",
        // catch-all, keep last
        r"^(?P<Series>.*)",
    ])
});

// ── Chapter tables ──────────────────────────────────────────────

pub static MANGA_CHAPTER: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        // เล่ม 1 บทที่ 2
        r"(?P<Volume>((เล่ม|เล่มที่))?(\s|_)?\.?\d+)(\s|_)(บทที่|ตอนที่)\.?(\s|_)?(?P<Chapter>\d+)",
        // Series_v11_c90-98, c90.5-100.5
        r"(\b|_)(c|ch)(\.?\s?)(?P<Chapter>(\d+(\.\d)?)(-c?\d+(\.\d)?)?)",
        // Series_[Group]_v1.1
        r"v\d+\.(\s|_)(?P<Chapter>\d+(?:.\d+|-\d+)?)",
        // Series - Episode 3 - Title #02
        r"^(?P<Series>.*)(?: |_)#(?P<Chapter>\d+)",
        // Series - Chapter 027, Series Chapter 11-10
        r"^(?!Vol)(?P<Series>.*)\s?(?<!vol\. )\sChapter\s(?P<Chapter>\d+(?:\.?[\d-]+)?)",
        r"(Глава|глава|Главы|Глава)(\.?)(\s|_)?(?P<Chapter>\d+(?:.\d+|-\d+)?)",
        // Series 018 (2019), Series 018.5 (2019)
        r"^(?P<Series>.+?)(?<!Vol)(?<!Vol.)(?<!Volume)\s(\d\s)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(?:\s\(\d{4}\))?(\b|_|-)",
        // Series S01 014
        r"(?P<Series>.*)\sS(?P<Volume>\d+)\s(?P<Chapter>\d+(?:.\d+|-\d+)?)",
        // Beelzebub_01_[Noodles], Beelzebub_153b_RHS
        r"^((?!v|vo|vol|Volume).)*(\s|_)(?P<Chapter>\.?\d+(?:.\d+|-\d+)?)(?P<Part>b)?(\s|_|\[|\()",
        // Series_Chapter21
        r"Chapter(?P<Chapter>\d+(-\d+)?)",
        // Series_MS_vol01_chp02
        r"(?P<Series>.*)(\s|_)(vol\d+)?(\s|_)Chp\.? ?(?P<Chapter>\d+)",
        // Vol 1 Chapter 2
        r"(?P<Volume>((vol|volume|v))?(\s|_)?\.?\d+)(\s|_)(Chp|Chapter)\.?(\s|_)?(?P<Chapter>\d+)",
        // 第25话
        r"第(?P<Chapter>\d+)话",
        // 제7화
        r"제?(?P<Chapter>\d+\.?\d+)(회|화|장)",
        // 第10話
        r"第?(?P<Chapter>\d+(?:\.\d+|-\d+)?)話",
        r"(?!Том)(?<!Том\.)\s\d+(\s|_)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(\s|_)(Глава|глава|Главы|Глава)",
    ])
});

pub static COMIC_CHAPTER: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    rules(&[
        // บทที่ 3
        r"(บทที่|ตอนที่)(\s)?(\.?)(\s|_)?(?P<Chapter>\d+(-\d+)?(\.\d+)?)",
        // Batman & Wildcat (1 of 3)
        r"(?P<Series>.*(\d{4})?)( |_)(?:\((?P<Chapter>\d+) of \d+)",
        // Batman Beyond 04 (of 6)
        r"(?P<Series>.+?)(?P<Chapter>\d+)(\s|_|-)?\(of",
        // Batman Beyond 2.0 001
        r"^(?P<Series>.+?\S\.\d) (?P<Chapter>\d+)",
        // Teen Titans v1 001
        r"^(?P<Series>.+?)(?: |_)v(?P<Volume>\d+)(?: |_)(c? ?)(?P<Chapter>(\d+(\.\d)?)-?(\d+(\.\d)?)?)(c? ?)",
        // Series #0
        r"^(?P<Series>.+?)(?:\s|_)#(?P<Chapter>\d+)",
        // Series - Chapter 01, Series - Issue #01
        r"^(?P<Series>.+?)((c(hapter)?)|issue)(_|\s)#?(?P<Chapter>(\d+(\.\d)?)-?(\d+(\.\d)?)?)",
        // Invincible 070.5 - Invincible Returns 1
        r"^(?P<Series>.+?)(?:\s|_)(c? ?(chapter)?)(?P<Chapter>(\d+(\.\d)?)-?(\d+(\.\d)?)?)(c? ?)-",
        // Batgirl Vol.2000 #57
        r"^(?P<Series>.+?)(?:vol\.?\d+)\s#(?P<Chapter>\d+)",
        r"(Глава|глава|Главы|Глава)(\.?)(\s|_)?(?P<Chapter>\d+(?:.\d+|-\d+)?)",
        r"(?!Том)(?<!Том\.)\s\d+(\s|_)?(?P<Chapter>\d+(?:\.\d+|-\d+)?)(\s|_)(Глава|глава|Главы|Глава)",
        // Series 01, Series (1996) 01 - Title
        r"^(?P<Series>.+?)(?: (?P<Chapter>\d+))",
        // Saga 001 (2012)
        r"(?P<Series>.+?)(?: |_)(c? ?)(?P<Chapter>(\d+(\.\d)?)-?(\d+(\.\d)?)?)\s\(\d{4}",
        // Amazing Man Comics chapter 25
        r"^(?!Vol)(?P<Series>.+?)( |_)c(hapter)( |_)(?P<Chapter>\d*)",
        // Amazing Man Comics issue #25
        r"^(?!Vol)(?P<Series>.+?)( |_)i(ssue)( |_) #(?P<Chapter>\d*)",
        // spawn-123, spawn-chapter-123
        r"^(?P<Series>.+?)-(chapter-)?(?P<Chapter>\d+)",
    ])
});

// ── Keyword and marker rules ────────────────────────────────────

/// Edition keywords (`Omnibus`, `Uncensored`).
pub static EDITION: LazyLock<Rule> =
    LazyLock::new(|| rule(r"\b(?:Omnibus(?:\s?Edition)?|Uncensored)\b"));

pub static MANGA_SPECIAL: LazyLock<Rule> = LazyLock::new(|| {
    rule(r"\b(?:Specials?|One[- ]?Shot|Extra(?:\sChapter)?(?=\s)|Art Collection|Side Stories|Bonus|Omake)\b")
});

pub static COMIC_SPECIAL: LazyLock<Rule> = LazyLock::new(|| {
    rule(concat!(
        r"\b(?:Specials?|One[- ]?Shot|Extra(?:\sChapter)?(?=\s)|Art Collection|Side Stories|Bonus",
        r"|\d.+?(\W|-|^)Annual|Annual(\W|-|$|\s#)|Book \d.+?|Compendium(\W|-|$|\s.+?)",
        r"|Omnibus(\W|-|$|\s.+?)|FCBD \d.+?|Absolute(\W|-|$|\s.+?)|Preview(\W|-|$|\s.+?)",
        r"|Hors[ -]S[ée]rie|TPB|HS|THS)\b",
    ))
});

/// European comic tags such as `Bd-Fr`.
pub static EUROPEAN_COMIC: LazyLock<Rule> = LazyLock::new(|| rule(r"\b(?:Bd[-\s]Fr)\b"));

/// Explicit special marker, `SP01`.
pub static SPECIAL_MARKER: LazyLock<Rule> = LazyLock::new(|| rule(r"SP\d+"));

pub static COVER_IMAGE: LazyLock<Rule> = LazyLock::new(|| {
    rule(r"(?<![\[a-z]\d\])(?:!?)(?<!back)(?<!back_)(?<!back-)(cover|folder)(?![\w\d])")
});

// ── User patterns ───────────────────────────────────────────────

/// User-supplied patterns for Generic libraries. Each must name a `Series`
/// or a `Chapter` group; patterns are tried in the order given.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    rules: Vec<Rule>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ParseError> {
        Self::compile_with_limit(patterns, BACKTRACK_LIMIT)
    }

    pub fn compile_with_limit<S: AsRef<str>>(
        patterns: &[S],
        backtrack_limit: usize,
    ) -> Result<Self, ParseError> {
        let mut rules = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let rule = Rule::compile(pattern, backtrack_limit).map_err(|e| {
                ParseError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                }
            })?;
            if !rule.has_group("Series") && !rule.has_group("Chapter") {
                return Err(ParseError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: "pattern must define a Series or Chapter group".to_string(),
                });
            }
            rules.push(rule);
        }
        Ok(Self { rules })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
