use super::wire::SpeakerInfo;

/// Locally bundled voice catalog. Ids are the provider's speaker ids.
const SPEAKERS: &[(&str, &str)] = &[
    ("1", "Ava (Female, Thai)"),
    ("2", "Poom (Male, Thai)"),
    ("3", "Malee (Female, Thai)"),
    ("4", "Somchai (Male, Thai)"),
    ("5", "Nida (Female, Thai)"),
    ("6", "Krit (Male, Thai)"),
    ("7", "Ploy (Female, Thai)"),
    ("8", "Ton (Male, Thai)"),
];

pub fn catalog() -> Vec<SpeakerInfo> {
    SPEAKERS
        .iter()
        .map(|(id, name)| SpeakerInfo {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn find(id: &str) -> Option<SpeakerInfo> {
    SPEAKERS
        .iter()
        .find(|(sid, _)| *sid == id)
        .map(|(id, name)| SpeakerInfo {
            id: id.to_string(),
            name: name.to_string(),
        })
}
