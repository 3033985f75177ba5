//! Per-mission filename matchers.
//!
//! Each archive encodes time coverage and version positionally in
//! underscore/hyphen-delimited filename tokens. A matcher validates the
//! token count and fixed literal tokens first, then parses the date and
//! version tokens. Anything nonconforming returns `None`; listings carry
//! index pages, checksums, and files from older naming eras that must be
//! silently skipped.

use chrono::NaiveDate;

use crate::record::KernelMeta;

/// A pure filename matcher: structured metadata or a rejection.
pub type Matcher = fn(&str) -> Option<KernelMeta>;

/// Parker Solar Probe long-term predicted ephemeris.
// Example filename: spp_nom_20180812_20250831_v038_RO5.bsp
pub fn psp_predict(name: &str) -> Option<KernelMeta> {
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() != 6 || tokens[0] != "spp" || tokens[1] != "nom" {
        return None;
    }
    Some(KernelMeta {
        start: date(tokens[2], "%Y%m%d")?,
        end: Some(date(tokens[3], "%Y%m%d")?),
        version: prefixed_version(tokens[4], 'v')?,
    })
}

/// Parker Solar Probe reconstructed ephemeris.
// Example filename: spp_recon_20180812_20181008_v001.bsp
pub fn psp_recon(name: &str) -> Option<KernelMeta> {
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() != 5 || tokens[0] != "spp" || tokens[1] != "recon" {
        return None;
    }
    Some(KernelMeta {
        start: date(tokens[2], "%Y%m%d")?,
        end: Some(date(tokens[3], "%Y%m%d")?),
        version: prefixed_version(tokens[4], 'v')?,
    })
}

/// Solar Orbiter predicted orbit.
// Example filename: solo_ANC_soc-orbit_20200210-20301120_L016_V1_00037_V01.bsp
pub fn solo_predict(name: &str) -> Option<KernelMeta> {
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() != 8 || tokens[0] != "solo" || tokens[1] != "ANC" || tokens[2] != "soc-orbit" {
        return None;
    }
    let dates: Vec<&str> = tokens[3].split('-').collect();
    if dates.len() != 2 {
        return None;
    }
    Some(KernelMeta {
        start: date(dates[0], "%Y%m%d")?,
        end: Some(date(dates[1], "%Y%m%d")?),
        version: prefixed_version(tokens[4], 'L')?,
    })
}

/// Solar Orbiter meta-kernel, flown or predicted series. The filename
/// carries a single issue date; start and end coincide.
// Example filename: solo_ANC_soc-flown-mk_V106_20201216_001.tm
pub fn solo_meta(name: &str) -> Option<KernelMeta> {
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() != 6
        || tokens[0] != "solo"
        || tokens[1] != "ANC"
        || (tokens[2] != "soc-flown-mk" && tokens[2] != "soc-pred-mk")
    {
        return None;
    }
    let issued = date(tokens[4], "%Y%m%d")?;
    Some(KernelMeta {
        start: issued,
        end: Some(issued),
        version: prefixed_version(tokens[3], 'V')?,
    })
}

/// STEREO Ahead reconstructed ephemeris.
// Example filename: ahead_2006_350_01.depm.bsp
pub fn stereo_recon_ahead(name: &str) -> Option<KernelMeta> {
    stereo_recon(name, "ahead")
}

/// STEREO Behind reconstructed ephemeris.
// Example filename: behind_2006_350_01.depm.bsp
pub fn stereo_recon_behind(name: &str) -> Option<KernelMeta> {
    stereo_recon(name, "behind")
}

/// The filename encodes only a start date (year plus day-of-year); end
/// dates are back-filled from the next record after sorting.
fn stereo_recon(name: &str, spacecraft: &str) -> Option<KernelMeta> {
    if !name.ends_with(".depm.bsp") {
        return None;
    }
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() != 4 || tokens[0] != spacecraft {
        return None;
    }
    let day_of_year = format!("{}{}", tokens[1], tokens[2]);
    Some(KernelMeta {
        start: date(&day_of_year, "%Y%j")?,
        end: None,
        version: bare_version(tokens[3])?,
    })
}

/// Cassini reconstructed ephemeris; the archive publishes a single
/// unversioned series.
// Example filename: 200128RU_SCPSE_09200_09215.bsp
pub fn cassini_recon(name: &str) -> Option<KernelMeta> {
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() != 4
        || tokens[0] != "200128RU"
        || tokens[1] != "SCPSE"
        || !tokens[3].ends_with(".bsp")
    {
        return None;
    }
    Some(KernelMeta {
        start: date(tokens[2], "%y%j")?,
        end: Some(date(stem(tokens[3]), "%y%j")?),
        version: 1,
    })
}

fn date(token: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, format).ok()
}

/// Strip a known single-character prefix and parse the rest as an integer;
/// a trailing extension is dropped first.
fn prefixed_version(token: &str, prefix: char) -> Option<u32> {
    stem(token).strip_prefix(prefix)?.parse().ok()
}

fn bare_version(token: &str) -> Option<u32> {
    stem(token).parse().ok()
}

fn stem(token: &str) -> &str {
    token.split('.').next().unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().expect("date")
    }

    #[test]
    fn psp_predict_parses_its_example() {
        let meta = psp_predict("spp_nom_20180812_20250831_v038_RO5.bsp").expect("match");
        assert_eq!(meta.start, day("2018-08-12"));
        assert_eq!(meta.end, Some(day("2025-08-31")));
        assert_eq!(meta.version, 38);
    }

    #[test]
    fn psp_recon_parses_its_example() {
        let meta = psp_recon("spp_recon_20180812_20181008_v001.bsp").expect("match");
        assert_eq!(meta.start, day("2018-08-12"));
        assert_eq!(meta.end, Some(day("2018-10-08")));
        assert_eq!(meta.version, 1);
    }

    #[test]
    fn solo_predict_parses_its_example() {
        let meta =
            solo_predict("solo_ANC_soc-orbit_20200210-20301120_L016_V1_00037_V01.bsp")
                .expect("match");
        assert_eq!(meta.start, day("2020-02-10"));
        assert_eq!(meta.end, Some(day("2030-11-20")));
        assert_eq!(meta.version, 16);
    }

    #[test]
    fn solo_meta_parses_both_series() {
        let flown = solo_meta("solo_ANC_soc-flown-mk_V106_20201216_001.tm").expect("match");
        assert_eq!(flown.start, day("2020-12-16"));
        assert_eq!(flown.end, Some(day("2020-12-16")));
        assert_eq!(flown.version, 106);

        assert!(solo_meta("solo_ANC_soc-pred-mk_V106_20201216_001.tm").is_some());
    }

    #[test]
    fn stereo_recon_parses_its_example() {
        let meta = stereo_recon_ahead("ahead_2006_350_01.depm.bsp").expect("match");
        assert_eq!(meta.start, day("2006-12-16"));
        assert_eq!(meta.end, None);
        assert_eq!(meta.version, 1);

        assert!(stereo_recon_behind("ahead_2006_350_01.depm.bsp").is_none());
        assert!(stereo_recon_behind("behind_2006_350_01.depm.bsp").is_some());
    }

    #[test]
    fn cassini_recon_parses_its_example() {
        let meta = cassini_recon("200128RU_SCPSE_09200_09215.bsp").expect("match");
        assert_eq!(meta.start, day("2009-07-19"));
        assert_eq!(meta.end, Some(day("2009-08-03")));
        assert_eq!(meta.version, 1);
    }

    #[test]
    fn wrong_token_count_is_rejected() {
        assert!(psp_predict("spp_nom_20180812_20250831_v038.bsp").is_none());
        assert!(psp_recon("spp_recon_20180812_v001.bsp").is_none());
        assert!(solo_predict("solo_ANC_soc-orbit_20200210-20301120_L016.bsp").is_none());
    }

    #[test]
    fn wrong_literal_tokens_are_rejected() {
        assert!(psp_predict("spp_recon_20180812_20250831_v038_RO5.bsp").is_none());
        assert!(psp_recon("spp_nom_20180812_20181008_v001.bsp").is_none());
        assert!(solo_meta("solo_ANC_soc-orbit_V106_20201216_001.tm").is_none());
        assert!(cassini_recon("200129RU_SCPSE_09200_09215.bsp").is_none());
    }

    #[test]
    fn unrelated_listing_entries_are_rejected_without_panicking() {
        for name in [
            "",
            "../",
            "index.html",
            "checksums.txt",
            "aareadme.txt",
            "spp_nom_notadate_20250831_v038_RO5.bsp",
            "spp_nom_20180812_20250831_vXXX_RO5.bsp",
        ] {
            assert!(psp_predict(name).is_none(), "accepted {name:?}");
            assert!(stereo_recon_ahead(name).is_none(), "accepted {name:?}");
            assert!(cassini_recon(name).is_none(), "accepted {name:?}");
        }
    }
}
