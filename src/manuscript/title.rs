//! Title page composition and header strings.

use crate::project::Project;

use super::{Block, Element, ManuscriptStyle};

/// Above this many words, counts are rounded to the nearest 500.
pub const NOVELLA_THRESHOLD: u64 = 17_500;

/// Words left out of the running-header title keywords.
pub const STOPWORDS: [&str; 13] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
];

/// Round a word count the way manuscripts report it.
///
/// Nearest 100 up to [`NOVELLA_THRESHOLD`], nearest 500 above it. Exact
/// halves round to the even multiple.
pub fn round_word_count(count: u64) -> u64 {
    let step = if count > NOVELLA_THRESHOLD { 500 } else { 100 };
    let quotient = count / step;
    let twice_remainder = (count % step) * 2;

    let rounded_up = twice_remainder > step || (twice_remainder == step && quotient % 2 == 1);
    if rounded_up {
        (quotient + 1) * step
    } else {
        quotient * step
    }
}

/// The title-page word count, e.g. `about 82,500 words`.
///
/// ```
/// use folio::manuscript::format_word_count;
///
/// assert_eq!(format_word_count(17_400), "about 17,400 words");
/// assert_eq!(format_word_count(17_600), "about 17,500 words");
/// assert_eq!(format_word_count(82_345), "about 82,500 words");
/// ```
pub fn format_word_count(count: u64) -> String {
    format!("about {} words", group_thousands(round_word_count(count)))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Surname for the running header: the last word of a multi-word name.
pub fn author_last_name(author: &str) -> &str {
    if author.contains(char::is_whitespace) {
        author.split_whitespace().last().unwrap_or(author)
    } else {
        author
    }
}

/// One or two significant title words for the running header.
///
/// ```
/// use folio::manuscript::title_keywords;
///
/// assert_eq!(title_keywords("The Last Signal"), "Last Signal");
/// assert_eq!(title_keywords("Of"), "Of");
/// assert_eq!(title_keywords(""), "Story");
/// ```
pub fn title_keywords(title: &str) -> String {
    let lowered = title.to_lowercase();
    let significant: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| !STOPWORDS.contains(w))
        .take(2)
        .collect();

    if !significant.is_empty() {
        return title_case(&significant.join(" "));
    }

    title
        .split_whitespace()
        .next()
        .unwrap_or("Story")
        .to_string()
}

/// Capitalize the first letter of each word and lowercase the rest.
///
/// Word boundaries are any character that is neither alphanumeric nor an
/// apostrophe, so `twenty-one` becomes `Twenty-One` and `don't` stays `Don't`.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphanumeric() || (in_word && matches!(c, '\'' | '\u{2019}'));
    }
    out
}

/// Title page blocks, from the author line down to the gap before the text.
pub fn compose_title_page(
    project: &Project,
    word_count: &str,
    style: &ManuscriptStyle,
) -> Vec<Element> {
    let mut elements = Vec::with_capacity(
        1 + project.contact.lines().count() + style.title_spacer_count + 2 + style.byline_spacer_count,
    );

    elements.push(
        Block::Heading {
            author: project.author.clone(),
            word_count: word_count.to_string(),
        }
        .into(),
    );
    elements.extend(
        project
            .contact
            .lines()
            .map(|line| Element::Block(Block::ContactLine(line.to_string()))),
    );
    elements.extend((0..style.title_spacer_count).map(|_| Element::Block(Block::Spacer)));
    elements.push(Block::TitleLine(project.title.clone()).into());
    elements.push(Block::BylineLine(format!("by {}", project.pen_name)).into());
    elements.extend((0..style.byline_spacer_count).map(|_| Element::Block(Block::Spacer)));

    elements
}
