//! Translation between UTF-8 and the v3 single-byte encoding, plus the
//! legacy message cipher.

/// Width game messages are wrapped to before they are ciphered.
pub const MESSAGE_WIDTH: usize = 40;

/// Offset the message cipher adds to every byte.
const CIPHER_SHIFT: u8 = 13;

/// Byte that stands in for a line break in ciphered text.
const CIPHER_NEWLINE: u8 = 0x1A;

/// Converts UTF-8 text to the v3 single-byte encoding.
///
/// Code points up to U+00FF collapse to their byte value; anything beyond
/// becomes `?`.
pub fn to_v3(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = u32::from(c);
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// Expands v3 single-byte text back to UTF-8.
pub fn from_v3(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Applies the message cipher: line breaks become 0x1A, every other
/// character is shifted up by 13 (mod 256).
pub fn encrypt(text: &str) -> Vec<u8> {
    to_v3(text)
        .into_iter()
        .map(|b| {
            if b == b'\n' {
                CIPHER_NEWLINE
            } else {
                b.wrapping_add(CIPHER_SHIFT)
            }
        })
        .collect()
}

/// Inverse of [`encrypt`].
pub fn decrypt(bytes: &[u8]) -> String {
    let plain: Vec<u8> = bytes
        .iter()
        .map(|&b| {
            if b == CIPHER_NEWLINE {
                b'\n'
            } else {
                b.wrapping_sub(CIPHER_SHIFT)
            }
        })
        .collect();
    from_v3(&plain)
}

/// Strips HTML from a Nu message body: `<br>` variants become line breaks,
/// `<sub>...</sub>` spans are removed entirely, remaining tags are dropped
/// and whitespace runs collapse to a single space.
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut pending_space = false;
    let mut skipping_sub = false;

    while let Some((pos, c)) = chars.next() {
        if c == '<' {
            let rest = &text[pos..];
            let Some(end) = rest.find('>') else {
                break;
            };
            let tag = rest[1..end].trim().to_ascii_lowercase();
            while let Some(&(p, _)) = chars.peek() {
                if p > pos + end {
                    break;
                }
                chars.next();
            }

            if skipping_sub {
                if tag == "/sub" {
                    skipping_sub = false;
                }
            } else if tag == "sub" {
                skipping_sub = true;
            } else if tag == "br" || tag == "br/" || tag == "br /" {
                out.push('\n');
                pending_space = false;
            }
            continue;
        }

        if skipping_sub {
            continue;
        }

        if c.is_whitespace() {
            pending_space = !out.is_empty() && !out.ends_with('\n');
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}

/// Greedy word wrap. Words longer than `width` are split hard.
pub fn word_wrap(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());

    for (index, line) in text.split('\n').enumerate() {
        if index != 0 {
            out.push('\n');
        }

        let mut column = 0usize;
        for word in line.split(' ').filter(|w| !w.is_empty()) {
            let mut word = word;
            loop {
                let sep = usize::from(column != 0);
                if column + sep + word.chars().count() <= width {
                    if sep != 0 {
                        out.push(' ');
                    }
                    out.push_str(word);
                    column += sep + word.chars().count();
                    break;
                }
                if column != 0 {
                    out.push('\n');
                    column = 0;
                    continue;
                }
                // A single word wider than the line.
                let split = word
                    .char_indices()
                    .nth(width)
                    .map_or(word.len(), |(i, _)| i);
                out.push_str(&word[..split]);
                out.push('\n');
                word = &word[split..];
            }
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cipher_shifts_and_marks_newlines() {
        assert_eq!(encrypt("AB\n"), vec![b'N', b'O', 0x1A]);
        assert_eq!(
            encrypt("hello\nworld"),
            vec![0x75, 0x72, 0x79, 0x79, 0x7C, 0x1A, 0x84, 0x7C, 0x7F, 0x79, 0x71]
        );
    }

    #[test]
    fn cipher_round_trips() {
        let input = "hello\nworld";
        assert_eq!(decrypt(&encrypt(input)), input);
    }

    #[test]
    fn non_latin_text_degrades_to_question_marks() {
        assert_eq!(to_v3("aÿ→"), b"a\xFF?".to_vec());
        assert_eq!(from_v3(b"a\xE9"), "a\u{E9}");
    }

    #[test]
    fn html_stripping() {
        assert_eq!(strip_html("a  b<br>c"), "a b\nc");
        assert_eq!(strip_html("x<sub>hidden</sub>y"), "xy");
        assert_eq!(strip_html("<b>bold</b> text"), "bold text");
    }

    #[test]
    fn wrapping_respects_width() {
        let wrapped = word_wrap("one two three four five six seven eight", 15);
        for line in wrapped.split('\n') {
            assert!(line.chars().count() <= 15);
        }
        assert_eq!(word_wrap("short", 40), "short");
    }
}
