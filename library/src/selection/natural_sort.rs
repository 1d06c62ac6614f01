use std::cmp::Ordering;

/// One run of a filename: digits compare by value, everything else case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk<'a> {
    Text(String),
    Number(&'a str),
}

/// Splits `name` into alternating text / digit runs that start and end with a (possibly
/// empty) text run, so equal positions of two keys always hold the same kind of chunk.
fn chunks(name: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = false;

    for (i, c) in name.char_indices() {
        let is_digit = c.is_ascii_digit();
        if is_digit != in_digits {
            push_chunk(&mut out, &name[start..i], in_digits);
            start = i;
            in_digits = is_digit;
        }
    }
    push_chunk(&mut out, &name[start..], in_digits);
    if in_digits {
        out.push(Chunk::Text(String::new()));
    }
    out
}

fn push_chunk<'a>(out: &mut Vec<Chunk<'a>>, run: &'a str, digits: bool) {
    if digits {
        out.push(Chunk::Number(run));
    } else {
        out.push(Chunk::Text(run.to_lowercase()));
    }
}

/// Compares two digit runs by numeric value without parsing (runs may exceed u64).
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_chunk(a: &Chunk<'_>, b: &Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Number(x), Chunk::Number(y)) => cmp_digits(x, y),
        (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
    }
}

/// Natural ordering of filenames: `2.png < 10.png < image1.png < image10.png`.
///
/// Keys are compared element-wise and a key that is a strict prefix of another sorts
/// first. Names with equal keys (`007.png` vs `7.png`, `A.png` vs `a.png`) fall back to a
/// plain byte comparison so the order is total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let ka = chunks(a);
    let kb = chunks(b);

    for (x, y) in ka.iter().zip(kb.iter()) {
        let ord = cmp_chunk(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ka.len().cmp(&kb.len()).then_with(|| a.cmp(b))
}

pub fn natural_sort<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}
