//! Built-in tracker spellings.
//!
//! Each row is a canonical code followed by every spelling that maps to it.
//! Spellings are compared ASCII case-insensitively, so `BLU`, `blu` and
//! `Blutopia` all land on the same row. The code itself is always accepted and
//! does not need to be repeated, although most rows do so for readability.

pub(crate) const BUILTIN_TRACKERS: &[(&str, &[&str])] = &[
    ("ACM", &["ACM", "eiga"]),
    ("AITHER", &["AITHER", "aither"]),
    ("AL", &["AL", "animelovers"]),
    ("ANT", &["ANT", "anthelion"]),
    ("AR", &["AR", "alpharatio"]),
    ("BHD", &["BHD", "beyond-hd"]),
    ("BHDTV", &["BHDTV", "bit-hdtv"]),
    ("BLU", &["BLU", "blutopia"]),
    ("CBR", &["CBR", "capybarabr"]),
    ("DP", &["DP", "darkpeers"]),
    ("FL", &["FL", "filelist"]),
    ("FNP", &["FNP", "fearnopeer"]),
    ("FRIKI", &["FRIKI", "frikibar"]),
    ("HDB", &["HDB", "hdbits"]),
    ("HDT", &["HDT", "hdts-announce"]),
    ("HHD", &["HHD", "homiehelpdesk"]),
    ("HUNO", &["HUNO", "hawke"]),
    ("ITT", &["ITT", "itatorrents"]),
    ("LCD", &["LCD", "locadora"]),
    ("LST", &["LST"]),
    ("LT", &["LT", "lat-team"]),
    ("MTV", &["MTV", "morethantv"]),
    ("NBL", &["NBL", "nebulance"]),
    ("OE", &["OE", "onlyencodes"]),
    ("OTW", &["OTW", "oldtoons"]),
    ("PSS", &["PSS", "privatesilverscreen"]),
    ("PT", &["PT", "portugas"]),
    ("PTER", &["PTER"]),
    ("PTP", &["PTP"]),
    ("PTT", &["PTT", "polishtorrent"]),
    ("R4E", &["R4E", "racing4everyone"]),
    ("RAS", &["RAS", "rastastugan"]),
    ("RF", &["RF", "reelflix"]),
    ("RTF", &["RTF", "retroflix"]),
    ("SAM", &["SAM", "samaritano"]),
    ("SN", &["SN", "swarmazon"]),
    ("STC", &["STC", "skipthecommericals"]),
    ("THR", &["THR", "torrenthr"]),
    ("TIK", &["TIK", "cinematik"]),
    ("TL", &["TL", "torrentleech"]),
    ("TOCA", &["TOCA", "tocashare"]),
    ("UHD", &["UHD", "uhdshare"]),
    ("ULCX", &["ULCX", "upload"]),
    ("UTP", &["UTP"]),
    ("YOINK", &["YOINK", "yoinked"]),
    ("YUS", &["YUS", "yu-scene"]),
];

/// Prefixes that identify a tracker on their own, regardless of what follows.
///
/// FileList names its torznab feeds `FileList-<something>`.
/// Prefixes are matched ASCII case-insensitively like every other spelling,
/// so `filelist-` and `FILELIST-` map to the same code.
pub(crate) const PREFIX_RULES: &[(&str, &str)] = &[("FileList-", "FL")];
