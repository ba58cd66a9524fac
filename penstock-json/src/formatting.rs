//! Canonical JSON pretty-printer.
//!
//! Formatting runs in two phases:
//!
//!     1. Canonicalization. The text is strict-parsed to a value tree and
//!        re-serialized compactly. The tree's object maps are ordered, so
//!        keys come back sorted lexicographically by Unicode code point, and
//!        string escaping is normalized by the serializer. Two documents
//!        with the same logical content canonicalize to the same compact
//!        string regardless of their original key order or whitespace.
//!
//!     2. Re-indentation. A single pass over the compact string drives an
//!        explicit state machine — a reified stack of lexical contexts plus
//!        an indent counter — that decides where newlines and indentation
//!        are inserted. Only whitespace is ever added; the characters of the
//!        compact string are emitted unchanged, so the output parses back to
//!        the same tree.
//!
//! The machine's rules give objects one member per line, keep arrays on a
//! single line, and break arrays that directly contain other arrays. Indent
//! depth is tracked by the push/pop rules, not by stack length: an object
//! nested in an array shares the array's depth level, which is what aligns
//! an object's closing brace with the array that opened it.

use crate::error::ParseError;
use crate::parsing::parse;

/// Indentation unit for one depth level.
const INDENT: &str = "  ";

/// Lexical contexts the re-indentation scan can be in. `Root` seeds the
/// stack and never pops, so the stack cannot underflow on valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    String,
    Array,
    Object,
    Escape,
}

/// Render JSON text in canonical form: sorted keys, two-space indentation,
/// deterministic newline placement. Fails with [`ParseError`] when the input
/// is not valid JSON.
pub fn format(source: &str) -> Result<String, ParseError> {
    let tree = parse(source)?;
    // Display for Value serializes compactly and cannot fail.
    Ok(reindent(&tree.to_string()))
}

/// Depth bookkeeping treats the `Root` seed like an enclosing object: a
/// top-level object indents its members exactly as it would nested in one.
fn is_object_like(context: Context) -> bool {
    matches!(context, Context::Object | Context::Root)
}

fn push_indent(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn reindent(compact: &str) -> String {
    let mut out = String::with_capacity(compact.len() * 2);
    let mut stack: Vec<Context> = vec![Context::Root];
    let mut indent: usize = 0;
    let mut prev = '\0';
    let mut chars = compact.chars().peekable();

    while let Some(c) = chars.next() {
        let top = *stack.last().unwrap_or(&Context::Root);

        // The character after a backslash is consumed whole: it closes the
        // escape and gets no further context processing, so an escaped quote
        // cannot terminate the string context.
        if top == Context::Escape {
            stack.pop();
            out.push(c);
            prev = c;
            continue;
        }

        if top == Context::String {
            match c {
                '"' => {
                    stack.pop();
                }
                '\\' => stack.push(Context::Escape),
                _ => {}
            }
        } else {
            match c {
                '"' => stack.push(Context::String),
                '{' => {
                    // Objects only claim a depth level inside object-like
                    // contexts; inside an array they share the array's level.
                    if is_object_like(top) {
                        indent += 1;
                    }
                    stack.push(Context::Object);
                }
                '}' => {
                    stack.pop();
                    if stack.last().copied().map(is_object_like).unwrap_or(false) {
                        indent -= 1;
                    }
                }
                '[' => {
                    stack.push(Context::Array);
                    indent += 1;
                }
                ']' => {
                    stack.pop();
                    indent -= 1;
                }
                _ => {}
            }
        }

        let current = *stack.last().unwrap_or(&Context::Root);
        let in_text = matches!(current, Context::String | Context::Escape);

        if !in_text {
            // Newline before '}' unless the object is empty; an object
            // closing inside an array aligns with the array's opening line.
            if c == '}' && prev != '{' {
                let depth = if current == Context::Array {
                    indent - 1
                } else {
                    indent
                };
                push_indent(&mut out, depth);
            }
            // Newline before an array directly nested in another array.
            if c == '[' && stack.len() >= 2 && stack[stack.len() - 2] == Context::Array {
                push_indent(&mut out, indent - 1);
            }
            // Newline before the close of a nested array.
            if c == ']' && prev == ']' {
                push_indent(&mut out, indent);
            }
        }

        out.push(c);

        if !in_text {
            // Newline after '{' unless the object is empty.
            if c == '{' && chars.peek() != Some(&'}') {
                push_indent(&mut out, indent);
            }
            if c == ',' {
                if is_object_like(current) {
                    push_indent(&mut out, indent);
                }
                if current == Context::Array {
                    out.push(' ');
                }
            }
            if c == ':' {
                out.push(' ');
            }
        }

        prev = c;
    }

    out
}
