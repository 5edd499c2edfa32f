use anyhow::Result;
use flate2::read::ZlibDecoder;
use std::collections::HashMap;
use std::io::Read;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Upper bound on one inflated object stream.
const MAX_OBJECT_STREAM_BYTES: u64 = 16 * 1024 * 1024;

/// Count the pages of a PDF document.
///
/// Objects are indexed by object number with later revisions replacing
/// earlier ones, so incrementally saved files count each page once. Object
/// streams are inflated and indexed the same way. The page count is the
/// `/Count` of the page tree the trailer's `/Root` points at; without a usable
/// trailer the largest page-tree `/Count` is used, then the number of distinct
/// leaf page objects.
pub fn count_pdf_pages(bytes: &[u8]) -> Result<u32> {
    if !bytes.starts_with(PDF_MAGIC) {
        anyhow::bail!("Not a PDF document");
    }

    let objects = index_objects(bytes);

    let pages = root_page_count(bytes, &objects)
        .or_else(|| max_tree_count(&objects))
        .unwrap_or_else(|| count_leaf_pages(&objects));

    if pages == 0 {
        anyhow::bail!("PDF document has no pages");
    }

    Ok(pages)
}

/// Latest dictionary text of every object, keyed by object number.
fn index_objects(bytes: &[u8]) -> HashMap<u32, Vec<u8>> {
    let mut objects = HashMap::new();
    let mut pos = 0;

    while let Some(offset) = find(&bytes[pos..], b"obj") {
        let at = pos + offset;
        let body_start = at + b"obj".len();
        pos = body_start;

        let Some(number) = object_number_before(bytes, at) else {
            continue;
        };
        if bytes.get(body_start).is_some_and(|b| b.is_ascii_alphanumeric()) {
            continue;
        }

        let body_end = find(&bytes[body_start..], b"endobj")
            .map(|n| body_start + n)
            .unwrap_or(bytes.len());
        let body = &bytes[body_start..body_end];
        pos = body_end;

        let (dict, data) = split_stream(body);
        if name_value(dict, b"/Type") == Some(b"ObjStm".as_slice()) {
            if let Some(data) = data {
                index_object_stream(dict, data, &mut objects);
            }
        }
        objects.insert(number, dict.to_vec());
    }

    objects
}

/// Index the objects packed inside a `/Type /ObjStm` stream.
fn index_object_stream(dict: &[u8], data: &[u8], objects: &mut HashMap<u32, Vec<u8>>) {
    let inflated;
    let content = match name_value(dict, b"/Filter") {
        None => data,
        Some(b"FlateDecode") => {
            let mut out = Vec::new();
            let mut decoder = ZlibDecoder::new(data).take(MAX_OBJECT_STREAM_BYTES);
            if decoder.read_to_end(&mut out).is_err() {
                return;
            }
            inflated = out;
            &inflated
        }
        Some(_) => return,
    };

    let (Some(count), Some(first)) = (int_value(dict, b"/N"), int_value(dict, b"/First")) else {
        return;
    };
    let first = first as usize;
    if first > content.len() {
        return;
    }

    let header: Vec<u32> = std::str::from_utf8(&content[..first])
        .unwrap_or("")
        .split_ascii_whitespace()
        .filter_map(|t| t.parse().ok())
        .collect();
    let entries: Vec<(u32, usize)> = header
        .chunks_exact(2)
        .take(count as usize)
        .map(|pair| (pair[0], first + pair[1] as usize))
        .collect();

    for (i, (number, start)) in entries.iter().enumerate() {
        let end = entries
            .get(i + 1)
            .map(|(_, next)| *next)
            .unwrap_or(content.len());
        if *start <= end && end <= content.len() {
            objects.insert(*number, content[*start..end].to_vec());
        }
    }
}

fn root_page_count(bytes: &[u8], objects: &HashMap<u32, Vec<u8>>) -> Option<u32> {
    let root_at = rfind(bytes, b"/Root")?;
    let root = ref_value(&bytes[root_at..], b"/Root")?;
    let pages = ref_value(objects.get(&root)?, b"/Pages")?;
    int_value(objects.get(&pages)?, b"/Count").filter(|n| *n > 0)
}

fn max_tree_count(objects: &HashMap<u32, Vec<u8>>) -> Option<u32> {
    objects
        .values()
        .filter(|dict| name_value(dict, b"/Type") == Some(b"Pages".as_slice()))
        .filter_map(|dict| int_value(dict, b"/Count"))
        .filter(|n| *n > 0)
        .max()
}

fn count_leaf_pages(objects: &HashMap<u32, Vec<u8>>) -> u32 {
    objects
        .values()
        .filter(|dict| name_value(dict, b"/Type") == Some(b"Page".as_slice()))
        .count() as u32
}

/// Parse the `N G` in front of an `obj` keyword at `at`.
fn object_number_before(bytes: &[u8], at: usize) -> Option<u32> {
    let mut i = at;
    let skip = |i: &mut usize, pred: fn(&u8) -> bool| {
        let end = *i;
        while *i > 0 && pred(&bytes[*i - 1]) {
            *i -= 1;
        }
        *i < end
    };

    if !skip(&mut i, u8::is_ascii_whitespace) || !skip(&mut i, u8::is_ascii_digit) {
        return None;
    }
    if !skip(&mut i, u8::is_ascii_whitespace) {
        return None;
    }
    let number_end = i;
    if !skip(&mut i, u8::is_ascii_digit) {
        return None;
    }
    if i > 0 && bytes[i - 1].is_ascii_alphanumeric() {
        return None;
    }

    std::str::from_utf8(&bytes[i..number_end]).ok()?.parse().ok()
}

/// Split an object body into its dictionary and optional stream data.
fn split_stream(body: &[u8]) -> (&[u8], Option<&[u8]>) {
    let Some(at) = find(body, b"stream") else {
        return (body, None);
    };
    let mut start = at + b"stream".len();
    if body.get(start) == Some(&b'\r') {
        start += 1;
    }
    if body.get(start) == Some(&b'\n') {
        start += 1;
    }
    let end = rfind(&body[start..], b"endstream")
        .map(|n| start + n)
        .unwrap_or(body.len());
    (&body[..at], Some(&body[start..end.max(start)]))
}

/// Position just past `key` used as a dictionary key (`/Page` does not match `/Pages`).
fn key_end(dict: &[u8], key: &[u8]) -> Option<usize> {
    let mut pos = 0;
    while let Some(offset) = find(&dict[pos..], key) {
        let end = pos + offset + key.len();
        if !dict.get(end).is_some_and(|b| b.is_ascii_alphanumeric()) {
            return Some(end);
        }
        pos = end;
    }
    None
}

fn name_value<'a>(dict: &'a [u8], key: &[u8]) -> Option<&'a [u8]> {
    let start = skip_whitespace(dict, key_end(dict, key)?);
    if dict.get(start) != Some(&b'/') {
        return None;
    }
    let rest = &dict[start + 1..];
    let len = rest
        .iter()
        .position(|b| !b.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    Some(&rest[..len])
}

fn int_value(dict: &[u8], key: &[u8]) -> Option<u32> {
    let start = skip_whitespace(dict, key_end(dict, key)?);
    let len = dict[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(dict.len() - start);
    std::str::from_utf8(&dict[start..start + len]).ok()?.parse().ok()
}

/// Object number of an indirect reference `N G R` stored under `key`.
fn ref_value(dict: &[u8], key: &[u8]) -> Option<u32> {
    let number = int_value(dict, key)?;
    let mut tokens = dict[key_end(dict, key)?..]
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty());
    tokens.next()?;
    let generation = tokens.next()?;
    let marker = tokens.next()?;
    (generation.iter().all(u8::is_ascii_digit) && marker.starts_with(b"R")).then_some(number)
}

fn skip_whitespace(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    idx
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .rposition(|window| window == needle)
}
