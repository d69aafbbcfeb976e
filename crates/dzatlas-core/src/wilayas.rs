//! Canonical wilaya reference table.
//!
//! The 58 administrative wilayas with their official codes, used as seed data
//! and as the resolution table for free-text region names from legacy
//! imports. Unmatched names pass through unresolved; resolution never fails
//! an import.

/// One wilaya reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WilayaRef {
    pub code: i32,
    pub name: &'static str,
    pub slug: &'static str,
}

pub const WILAYAS: [WilayaRef; 58] = [
    WilayaRef { code: 1, name: "Adrar", slug: "adrar" },
    WilayaRef { code: 2, name: "Chlef", slug: "chlef" },
    WilayaRef { code: 3, name: "Laghouat", slug: "laghouat" },
    WilayaRef { code: 4, name: "Oum El Bouaghi", slug: "oum-el-bouaghi" },
    WilayaRef { code: 5, name: "Batna", slug: "batna" },
    WilayaRef { code: 6, name: "Béjaïa", slug: "bejaia" },
    WilayaRef { code: 7, name: "Biskra", slug: "biskra" },
    WilayaRef { code: 8, name: "Béchar", slug: "bechar" },
    WilayaRef { code: 9, name: "Blida", slug: "blida" },
    WilayaRef { code: 10, name: "Bouira", slug: "bouira" },
    WilayaRef { code: 11, name: "Tamanrasset", slug: "tamanrasset" },
    WilayaRef { code: 12, name: "Tébessa", slug: "tebessa" },
    WilayaRef { code: 13, name: "Tlemcen", slug: "tlemcen" },
    WilayaRef { code: 14, name: "Tiaret", slug: "tiaret" },
    WilayaRef { code: 15, name: "Tizi Ouzou", slug: "tizi-ouzou" },
    WilayaRef { code: 16, name: "Alger", slug: "alger" },
    WilayaRef { code: 17, name: "Djelfa", slug: "djelfa" },
    WilayaRef { code: 18, name: "Jijel", slug: "jijel" },
    WilayaRef { code: 19, name: "Sétif", slug: "setif" },
    WilayaRef { code: 20, name: "Saïda", slug: "saida" },
    WilayaRef { code: 21, name: "Skikda", slug: "skikda" },
    WilayaRef { code: 22, name: "Sidi Bel Abbès", slug: "sidi-bel-abbes" },
    WilayaRef { code: 23, name: "Annaba", slug: "annaba" },
    WilayaRef { code: 24, name: "Guelma", slug: "guelma" },
    WilayaRef { code: 25, name: "Constantine", slug: "constantine" },
    WilayaRef { code: 26, name: "Médéa", slug: "medea" },
    WilayaRef { code: 27, name: "Mostaganem", slug: "mostaganem" },
    WilayaRef { code: 28, name: "M'Sila", slug: "msila" },
    WilayaRef { code: 29, name: "Mascara", slug: "mascara" },
    WilayaRef { code: 30, name: "Ouargla", slug: "ouargla" },
    WilayaRef { code: 31, name: "Oran", slug: "oran" },
    WilayaRef { code: 32, name: "El Bayadh", slug: "el-bayadh" },
    WilayaRef { code: 33, name: "Illizi", slug: "illizi" },
    WilayaRef { code: 34, name: "Bordj Bou Arréridj", slug: "bordj-bou-arreridj" },
    WilayaRef { code: 35, name: "Boumerdès", slug: "boumerdes" },
    WilayaRef { code: 36, name: "El Tarf", slug: "el-tarf" },
    WilayaRef { code: 37, name: "Tindouf", slug: "tindouf" },
    WilayaRef { code: 38, name: "Tissemsilt", slug: "tissemsilt" },
    WilayaRef { code: 39, name: "El Oued", slug: "el-oued" },
    WilayaRef { code: 40, name: "Khenchela", slug: "khenchela" },
    WilayaRef { code: 41, name: "Souk Ahras", slug: "souk-ahras" },
    WilayaRef { code: 42, name: "Tipaza", slug: "tipaza" },
    WilayaRef { code: 43, name: "Mila", slug: "mila" },
    WilayaRef { code: 44, name: "Aïn Defla", slug: "ain-defla" },
    WilayaRef { code: 45, name: "Naâma", slug: "naama" },
    WilayaRef { code: 46, name: "Aïn Témouchent", slug: "ain-temouchent" },
    WilayaRef { code: 47, name: "Ghardaïa", slug: "ghardaia" },
    WilayaRef { code: 48, name: "Relizane", slug: "relizane" },
    WilayaRef { code: 49, name: "Timimoun", slug: "timimoun" },
    WilayaRef { code: 50, name: "Bordj Badji Mokhtar", slug: "bordj-badji-mokhtar" },
    WilayaRef { code: 51, name: "Ouled Djellal", slug: "ouled-djellal" },
    WilayaRef { code: 52, name: "Béni Abbès", slug: "beni-abbes" },
    WilayaRef { code: 53, name: "In Salah", slug: "in-salah" },
    WilayaRef { code: 54, name: "In Guezzam", slug: "in-guezzam" },
    WilayaRef { code: 55, name: "Touggourt", slug: "touggourt" },
    WilayaRef { code: 56, name: "Djanet", slug: "djanet" },
    WilayaRef { code: 57, name: "El M'Ghair", slug: "el-mghair" },
    WilayaRef { code: 58, name: "El Meniaa", slug: "el-meniaa" },
];

/// Resolve a free-text region name: trimmed, case-insensitive, exact match.
/// Returns None for anything else; callers keep the raw text.
pub fn resolve_name(name: &str) -> Option<&'static WilayaRef> {
    let needle = name.trim();
    WILAYAS.iter().find(|w| w.name.eq_ignore_ascii_case(needle))
}

/// Look up by canonical slug (used when anchoring imported rows).
pub fn by_slug(slug: &str) -> Option<&'static WilayaRef> {
    WILAYAS.iter().find(|w| w.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_holds_all_58() {
        assert_eq!(WILAYAS.len(), 58);
        // codes are the 1..=58 sequence with no gaps
        for (i, w) in WILAYAS.iter().enumerate() {
            assert_eq!(w.code, i as i32 + 1);
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let mut slugs: Vec<&str> = WILAYAS.iter().map(|w| w.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 58);
    }

    #[test]
    fn test_resolve_name_is_case_insensitive_exact() {
        assert_eq!(resolve_name("Alger").unwrap().code, 16);
        assert_eq!(resolve_name("  alger ").unwrap().code, 16);
        assert_eq!(resolve_name("ORAN").unwrap().code, 31);
        // substring or unknown names pass through unresolved
        assert!(resolve_name("Alg").is_none());
        assert!(resolve_name("Gotham").is_none());
    }

    #[test]
    fn test_by_slug() {
        assert_eq!(by_slug("tizi-ouzou").unwrap().name, "Tizi Ouzou");
        assert!(by_slug("tizi").is_none());
    }
}
