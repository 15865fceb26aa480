use parish_bulletin_engine::document::{Container, Length, ParagraphStyle, RichTextHost, outline};
use parish_bulletin_engine::markup::{RenderOptions, plain_text, render};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rendered(raw: &str) -> Container {
    let mut c = Container::cell();
    render(&mut c, raw, &RenderOptions::default());
    c
}

/// `(text, style flags)` of every run, in order.
fn runs(c: &Container) -> Vec<(String, String)> {
    c.paragraphs()
        .flat_map(|p| p.runs())
        .map(|r| {
            let flags = parish_bulletin_engine::document::outline::style_flags(r.style);
            (r.text.clone(), flags)
        })
        .collect()
}

#[rstest]
#[case("<b>a</b>b", &[("a", "b"), ("b", "")])]
#[case("<i>a<u>b</u>c</i>d", &[("a", "i"), ("b", "i,u"), ("c", "i"), ("d", "")])]
#[case("<s>1</s><b>2<s>3</s></b>", &[("1", "s"), ("2", "b"), ("3", "b,s")])]
#[case("<u><b>a</u>b</b>c", &[("a", "b,u"), ("b", "b"), ("c", "")])]
fn runs_carry_exactly_the_open_styles(#[case] raw: &str, #[case] expected: &[(&str, &str)]) {
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(t, f)| (t.to_string(), f.to_string()))
        .collect();
    assert_eq!(runs(&rendered(raw)), expected);
}

#[test]
fn bold_then_plain() {
    insta::assert_snapshot!(outline(&rendered("<b>Hi</b> there")), @r#"¶ "Hi"{b} " there""#);
}

#[test]
fn double_break_survives_cleanup() {
    let c = rendered("A<br><br>B");
    assert_eq!(c.paragraph_count(), 3);
    insta::assert_snapshot!(outline(&c), @r#"
    ¶ "A"
    ¶ "⠀"
    ¶ "B"
    "#);
}

#[test]
fn list_then_paragraph() {
    let c = rendered("<ul>One<br>Two</ul>After");
    insta::assert_snapshot!(outline(&c), @r#"
    • "One"
    • "Two"
    ¶ "After"
    "#);

    let indents: Vec<(ParagraphStyle, Length)> =
        c.paragraphs().map(|p| (p.style, p.left_indent)).collect();
    assert_eq!(
        indents,
        vec![
            (ParagraphStyle::ListBullet, Length::pt(24.0)),
            (ParagraphStyle::ListBullet, Length::pt(24.0)),
            (ParagraphStyle::Normal, Length::ZERO),
        ]
    );
}

#[test]
fn unknown_tag_kept_verbatim() {
    let c = rendered("Weird <xyz> tag");
    assert_eq!(c.paragraph_count(), 1);
    assert!(c.paragraphs().next().unwrap().text().contains("<xyz>"));
}

#[rstest]
#[case("<b>Hi</b> there", "Hi there")]
#[case("Weird <xyz> tag", "Weird <xyz> tag")]
#[case("<i>Sat</i> 6pm <s>vigil</s> </br>done", "Sat 6pm vigil </br>done")]
#[case("a < b and c > d", "a < b and c > d")]
#[case("<u>unterminated <b", "unterminated <b")]
#[case("<<b>x</b>", "<x")]
#[case("<>", "<>")]
fn rendered_text_is_the_tag_stripped_source(#[case] raw: &str, #[case] expected: &str) {
    let c = rendered(raw);
    let text: String = c.paragraphs().map(|p| p.text()).collect();
    assert_eq!(text, expected);
    assert_eq!(plain_text(raw), expected);
}

#[test]
fn a_stray_angle_bracket_is_not_lost() {
    let c = rendered("a < b and c > d");
    assert_eq!(c.paragraphs().next().unwrap().text(), "a < b and c > d");
}

#[test]
fn closing_removes_nearest_instance_only() {
    let c = rendered("<b><i>x</i>y");
    assert_eq!(
        runs(&c),
        vec![
            ("x".to_string(), "b,i".to_string()),
            ("y".to_string(), "b".to_string())
        ]
    );

    let orphan = rendered("</b>plain");
    assert_eq!(runs(&orphan), vec![("plain".to_string(), String::new())]);
}

#[rstest]
#[case("")]
#[case("<b></b>")]
#[case("<br>")]
#[case("<ul></ul>")]
fn empty_output_keeps_the_placeholder(#[case] raw: &str) {
    let c = rendered(raw);
    assert_eq!(c.paragraph_count(), 1);
    assert!(c.paragraphs().next().unwrap().is_blank());
}
