/// Tunisia's 24 governorates, the accepted shipping destinations.
pub const GOVERNORATES: [&str; 24] = [
    "Tunis",
    "Ariana",
    "Ben Arous",
    "Manouba",
    "Nabeul",
    "Zaghouan",
    "Bizerte",
    "Béja",
    "Jendouba",
    "Kef",
    "Siliana",
    "Kairouan",
    "Kasserine",
    "Sidi Bouzid",
    "Sousse",
    "Monastir",
    "Mahdia",
    "Sfax",
    "Gafsa",
    "Tozeur",
    "Kebili",
    "Gabès",
    "Medenine",
    "Tataouine",
];

fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'é' | 'è' | 'É' | 'È' => 'e',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Canonical spelling of a governorate, ignoring case and accents.
pub fn canonical_governorate(input: &str) -> Option<&'static str> {
    let wanted = fold(input);
    GOVERNORATES.into_iter().find(|g| fold(g) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_regardless_of_case_and_accents() {
        assert_eq!(canonical_governorate("tunis"), Some("Tunis"));
        assert_eq!(canonical_governorate("  BEN AROUS "), Some("Ben Arous"));
        assert_eq!(canonical_governorate("Beja"), Some("Béja"));
        assert_eq!(canonical_governorate("gabes"), Some("Gabès"));
    }

    #[test]
    fn rejects_unknown_places() {
        assert_eq!(canonical_governorate("Paris"), None);
        assert_eq!(canonical_governorate(""), None);
    }
}
