//! Character-level Cyrillic/Latin transliteration.
//!
//! The two directions are deliberately not inverses: Cyrillic to Latin uses
//! digraphs (`щ` -> `shch`) while Latin to Cyrillic maps one letter at a time,
//! so `"igor stravinskii"` comes back as `"игор стравинскии"`. Search retries
//! rely on exactly this mapping.

fn cyrillic_to_latin_char(c: char) -> Option<&'static str> {
    let s = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "i",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'і' => "i",
        'ї' => "yi",
        'є' => "ye",
        _ => return None,
    };
    Some(s)
}

fn latin_to_cyrillic_char(c: char) -> Option<&'static str> {
    let s = match c {
        'a' => "а",
        'b' => "б",
        'c' => "к",
        'd' => "д",
        'e' => "е",
        'f' => "ф",
        'g' => "г",
        'h' => "х",
        'i' => "и",
        'j' => "ж",
        'k' => "к",
        'l' => "л",
        'm' => "м",
        'n' => "н",
        'o' => "о",
        'p' => "п",
        'q' => "к",
        'r' => "р",
        's' => "с",
        't' => "т",
        'u' => "у",
        'v' => "в",
        'w' => "в",
        'x' => "кс",
        'y' => "й",
        'z' => "з",
        _ => return None,
    };
    Some(s)
}

fn map_chars(input: &str, table: fn(char) -> Option<&'static str>) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        match table(c) {
            Some(s) => out.push_str(s),
            None => out.push(c),
        }
    }
    out
}

/// Lower-cases and transliterates Cyrillic letters; everything else passes
/// through.
pub fn cyrillic_to_latin(input: &str) -> String {
    map_chars(input, cyrillic_to_latin_char)
}

/// Lower-cases and transliterates Latin letters one at a time.
pub fn latin_to_cyrillic(input: &str) -> String {
    map_chars(input, latin_to_cyrillic_char)
}

pub fn contains_cyrillic(input: &str) -> bool {
    input.chars().any(|c| matches!(c, '\u{0400}'..='\u{04FF}'))
}
