//! Stripping of the editor's rich-text markup from subtitle text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    Outside,
    InsideTag,
}

/// The only entities that are decoded. Anything else starting with `&` is
/// left alone.
const ENTITIES: [(&str, char); 2] = [("&lt;", '<'), ("&gt;", '>')];

/// Removes `<...>` tags and square brackets and decodes `&lt;`/`&gt;`.
///
/// Tags do not nest: a `<` opens a tag and the next `>` closes it, and an
/// unclosed `<` swallows the rest of the input. Entities are recognised even
/// inside a tag, where they produce no output like everything else there.
pub fn clean(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut state = TagState::Outside;
    let mut rest = raw;

    while let Some(c) = rest.chars().next() {
        let mut consumed = c.len_utf8();
        let emit = match c {
            '<' => {
                state = TagState::InsideTag;
                None
            }
            '>' => {
                state = TagState::Outside;
                None
            }
            '[' | ']' => None,
            '&' => match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
                Some((entity, decoded)) => {
                    consumed = entity.len();
                    Some(*decoded)
                }
                None => Some('&'),
            },
            _ => Some(c),
        };
        if let (Some(c), TagState::Outside) = (emit, state) {
            out.push(c);
        }
        rest = &rest[consumed..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_clean {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                assert_eq!(clean(input), expected);
            }
        )*
        }
    }

    test_clean! {
        test_clean_tag: ("a<b>c", "ac"),
        test_clean_entities: ("x&lt;y&gt;z", "x<y>z"),
        test_clean_brackets: ("[a]b", "ab"),
        test_clean_empty: ("", ""),
        test_clean_plain: ("  keep  spacing ", "  keep  spacing "),
        test_clean_unknown_entity: ("fish &amp; chips", "fish &amp; chips"),
        test_clean_bare_ampersand: ("a & b", "a & b"),
        test_clean_truncated_entity: ("a &lt", "a &lt"),
        test_clean_entity_at_end: ("a&gt;", "a>"),
        test_clean_unclosed_tag: ("visible<hidden forever", "visible"),
        test_clean_stray_close: ("a>b", "ab"),
        test_clean_no_nesting: ("<a<b>c>d", "cd"),
        test_clean_entity_in_tag: ("<&lt;>x", "x"),
        test_clean_entity_does_not_open_tag: ("&lt;b&gt;bold", "<b>bold"),
        test_clean_brackets_in_tag: ("<[x]>y", "y"),
        test_clean_unicode: ("<i>héllo wörld</i> 字幕", "héllo wörld 字幕"),
        test_clean_newlines: ("line one\nline two", "line one\nline two"),
    }

    #[test]
    fn strips_editor_markup() {
        let raw = "<font id=\"\" path=\"C:/Fonts/en.ttf\"><color=(1.000000, 1.000000, 1.000000, 1.000000)><size=5.000000>[Hello there]</size></color></font>";
        assert_eq!(clean(raw), "Hello there");
    }
}
