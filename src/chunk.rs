/// Split `text` into pieces of at most `max_chars` characters.
///
/// `levels` lists boundary characters from most to least preferred. Splits
/// happen after a boundary character, falling back to the next level when a
/// piece is still too long, and to a hard split when no level is left.
/// Concatenating the result yields the input unchanged.
pub fn chunk_text(text: &str, max_chars: usize, levels: &[&[char]]) -> Vec<String> {
    let mut chunks = Vec::new();
    if max_chars == 0 {
        return chunks;
    }
    pack(text, max_chars, levels, &mut chunks);
    chunks
}

fn pack(text: &str, max_chars: usize, levels: &[&[char]], out: &mut Vec<String>) {
    if text.chars().count() <= max_chars {
        if !text.is_empty() {
            out.push(text.to_string());
        }
        return;
    }

    let Some((boundaries, rest)) = levels.split_first() else {
        hard_split(text, max_chars, out);
        return;
    };

    let mut current = String::new();
    let mut current_len = 0;
    for piece in text.split_inclusive(|c: char| boundaries.contains(&c)) {
        let piece_len = piece.chars().count();
        if piece_len > max_chars {
            flush(&mut current, &mut current_len, out);
            pack(piece, max_chars, rest, out);
            continue;
        }
        if current_len + piece_len > max_chars {
            flush(&mut current, &mut current_len, out);
        }
        current.push_str(piece);
        current_len += piece_len;
    }
    flush(&mut current, &mut current_len, out);
}

fn flush(current: &mut String, current_len: &mut usize, out: &mut Vec<String>) {
    if !current.is_empty() {
        out.push(std::mem::take(current));
    }
    *current_len = 0;
}

fn hard_split(text: &str, max_chars: usize, out: &mut Vec<String>) {
    let chars: Vec<char> = text.chars().collect();
    for window in chars.chunks(max_chars) {
        out.push(window.iter().collect());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &[&[char]] = &[&['\n'], &[' ']];

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(chunk_text("hello world", 50, WORDS), vec!["hello world"]);
        assert!(chunk_text("", 50, WORDS).is_empty());
    }

    #[test]
    fn prefers_line_boundaries() {
        let text = "first line\nsecond line\nthird";
        let chunks = chunk_text(text, 12, WORDS);
        assert_eq!(chunks, vec!["first line\n", "second line\n", "third"]);
    }

    #[test]
    fn falls_back_to_words_then_hard_split() {
        let text = "aaaa bbbb ccccccccccccc";
        let chunks = chunk_text(text, 10, WORDS);
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks[0], "aaaa bbbb ");
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "தலைவலி காய்ச்சல் இருமல்";
        let chunks = chunk_text(text, 8, WORDS);
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 8));
    }
}
