/*!
 * Translation of source part-of-speech and gloss tags into a canonical tagset.
 *
 * Lookups are case-insensitive and fall back to the input tag, so mapping
 * never fails. Only the Typecraft (`tc`) target tagset exists today.
 */

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::errors::TypecraftError;

/// Target tagset of a mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagSet {
    /// The Typecraft tagset
    #[default]
    Tc,
}

impl TagSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tc => "tc",
        }
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagSet {
    type Err = TypecraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tc" | "typecraft" => Ok(Self::Tc),
            _ => Err(TypecraftError::UnsupportedOperation(format!(
                "unknown tagset '{}'",
                s
            ))),
        }
    }
}

// STTS (German), Brown-style and Typecraft verb-frame tags → Typecraft POS.
// An empty target means "no counterpart" and leaves the tag as it is.
static POS_CONVERSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("$", "PUN"),
        ("$(", "PUN"),
        ("$.", "PUN"),
        ("adj", "ADJ"),
        ("adja", "ADJ"),
        ("adjd", "ADJ"),
        ("adv", "ADV"),
        ("advprt", "PRT"),
        ("advs", "ADV"),
        ("appo", "PPOST"),
        ("appr", "PREP"),
        ("apprart", "PREP"),
        ("apzr", ""),
        ("art", "ART"),
        ("c", "COMP"),
        ("card", "CARD"),
        ("conj", "CONJ"),
        ("deg", "PRT"),
        ("expl", "EXPL"),
        ("fm", ""),
        ("inf", "PRTinf"),
        ("interjct", "INTRJCT"),
        ("itj", "INTRJCT"),
        ("kokom", "PRT"),
        ("kon", "CONJC"),
        ("koui", "CONJSINF"),
        ("kous", "CONJS"),
        ("ne", "Np"),
        ("net", ""),
        ("nn", "N"),
        ("nprop", "Np"),
        ("ord", "ORD"),
        ("p", "PREP"),
        ("pav", "PN"),
        ("pdat", "PNdem"),
        ("pds", "PNdem"),
        ("piat", "PN"),
        ("pidat", ""),
        ("pis", "PN"),
        ("pninterr", "Wh"),
        ("pnrefl", "PNrefl"),
        ("pnresmptv", "PNrel"),
        ("poss", "PRTposs"),
        ("pper", "PN"),
        ("pposat", "Pnposs"),
        ("pposs", "Pnposs"),
        ("prelat", "PNrel"),
        ("prels", "Pnrel"),
        ("prf", "Pnrefl"),
        ("prtcmpr", "PRT"),
        ("ptka", "PRT"),
        ("ptkant", "PRTresp"),
        ("ptkneg", "PRTneg"),
        ("ptkvz", "PRTv"),
        ("ptkzu", "PRTinf"),
        ("pun", "PUN"),
        ("punct", "PUN"),
        ("pwat", "PROint"),
        ("pwav", "PROint"),
        ("pws", "Wh"),
        ("quantinterr", "QUANT"),
        ("sgml", ""),
        ("spell", ""),
        ("trunc", "TRUNC"),
        ("v-ditr", "Vdtr"),
        ("v-ditrobl", "V"),
        ("v-extrapos", "V"),
        ("v-extraposobl", "V"),
        ("v-intr", "Vitr"),
        ("v-introbl", "VitrOBL"),
        ("v-intrscpr", "V"),
        ("v-obextrapos", "V"),
        ("v-presntn", "V"),
        ("v-presntnobl", "V"),
        ("v-tr", "Vtr"),
        ("v-trobl", "VtrOBL"),
        ("v-trscpr", "V"),
        ("vafin", "AUX"),
        ("vaimp", "AUX"),
        ("vainf", "AUX"),
        ("vapp", "PTCP"),
        ("vaux", "AUX"),
        ("vcopa", "COP"),
        ("vcopn", "COP"),
        ("vmfin", "Vmod"),
        ("vminf", "Vmod"),
        ("vmpp", "Vmod"),
        ("vrefl", "V"),
        ("vrefl-ob", "V"),
        ("vrefl-obl", "V"),
        ("vrefl-presobl", "V"),
        ("vrefl-scpr", "V"),
        ("vrefl-trobl", "V"),
        ("vvfin", "V"),
        ("vvimp", "V"),
        ("vvinf", "V"),
        ("vvizu", "V"),
        ("vvpp", "V"),
        ("xy", "XY"),
    ])
});

/// Maps a POS tag into `tagset`, returning `tag` unchanged when unknown.
pub fn map_pos(tag: &str, tagset: TagSet) -> String {
    match tagset {
        TagSet::Tc => match POS_CONVERSIONS.get(tag.to_lowercase().as_str()) {
            Some(mapped) if !mapped.is_empty() => (*mapped).to_string(),
            _ => tag.to_string(),
        },
    }
}

/// Maps glosses into `tagset`.
///
/// No gloss conversions are registered yet, so this is the identity.
pub fn map_gloss(glosses: &[String], tagset: TagSet) -> Vec<String> {
    match tagset {
        TagSet::Tc => glosses.to_vec(),
    }
}
