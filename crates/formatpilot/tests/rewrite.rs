use formatpilot::{length_warning, FormatPilot, Options};

fn rewrite(html: &str) -> String {
    FormatPilot::new().rewrite(html)
}

#[test]
fn bold_followed_by_body_becomes_header() {
    assert!(rewrite("<strong>Bold</strong> body").ends_with("BOLD\n\nbody"));
}

#[test]
fn bold_at_line_end_has_no_blank_line() {
    assert_eq!(rewrite("<strong>Bold</strong>"), "BOLD");
}

#[test]
fn bold_before_inline_tag_drops_blank_span() {
    assert_eq!(rewrite("<strong>A</strong> <em>b</em>"), "Ab");
}

#[test]
fn italic_is_unwrapped() {
    assert_eq!(rewrite("<em>x</em>"), "x");
}

#[test]
fn list_becomes_bullets() {
    assert_eq!(
        rewrite("<ul><li>Item 1</li><li>Item 2</li></ul>"),
        "• Item 1\n• Item 2"
    );
}

#[test]
fn many_sequential_blocks_are_rendered() {
    let pilot = FormatPilot::with_options(Options {
        character_limit: usize::MAX,
    });

    let quotes = pilot.rewrite(&"<blockquote>x</blockquote>\n".repeat(5_000));
    assert_eq!(quotes.lines().filter(|line| *line == "> x").count(), 5_000);
    assert!(!quotes.contains("blockquote"));

    let lists = pilot.rewrite(&"<ul><li>x</li></ul>\n".repeat(5_000));
    assert_eq!(lists.lines().filter(|line| *line == "• x").count(), 5_000);
    assert!(!lists.contains("<ul>"));
}

#[test]
fn literal_link_becomes_anchor() {
    assert_eq!(
        rewrite("Veja mais em [GitHub](https://github.com)"),
        "Veja mais em <a href=\"https://github.com\">GitHub</a>"
    );
}

#[test]
fn blockquote_between_paragraphs() {
    assert_eq!(
        rewrite("<p>Antes</p>\n<blockquote>\n<p>Citação</p>\n</blockquote>\n<p>Depois</p>"),
        "Antes\n\n> Citação\n\nDepois"
    );
}

#[test]
fn literal_pipe_table_is_flattened() {
    assert_eq!(
        rewrite("<p>| Nome | Idade |\n| --- | --- |\n| Ana | 30 |</p>"),
        "Nome | Idade\nAna | 30"
    );
}

#[test]
fn markup_tags_never_survive() {
    let inputs = [
        "<strong>unclosed",
        "<p><p>x</p>",
        "<<p>p>text",
        "<em><strong>a</em></strong>",
        "<h1>a<h2>b",
        "<strong>a\nb</strong> c",
        "<<strong>strong>>",
        "</em></em><em>",
        "<ul><li><strong>x</strong></li>",
    ];

    for input in inputs {
        let output = rewrite(input);
        for tag in [
            "<strong>", "</strong>", "<em>", "</em>", "<p>", "</p>", "<h1>", "</h1>", "<h2>",
            "</h2>", "<h3>", "<h4>", "<h5>", "<h6>",
        ] {
            assert!(
                !output.contains(tag),
                "{tag:?} left in {output:?} for input {input:?}"
            );
        }
    }
}

#[test]
fn malformed_markup_degrades_to_text() {
    assert_eq!(rewrite("<ul><li>never closed"), "<ul><li>never closed");
    assert_eq!(rewrite("</blockquote> stray"), "</blockquote> stray");
}

#[test]
fn rewrite_is_idempotent_within_limit() {
    let inputs = [
        "<p><strong>Negrito</strong> e <em>itálico</em></p>\n<ul>\n<li>Lista 1</li>\n<li>Lista 2</li>\n</ul>",
        "Veja mais em [GitHub](https://github.com)",
        "<blockquote>\n<p>Citação</p>\n</blockquote>",
        "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>",
        "<ol start=\"2\"><li>dois</li><li>três</li></ol>",
        "Use <code>cargo</code> :rocket:",
        "<p>| a | b |\n|---|---|\n| 1 | 2 |</p>",
        "<h1>Título</h1>\n<p>Corpo</p>\n<hr />\n<p>Fim</p>",
    ];

    for input in inputs {
        let once = rewrite(input);
        assert_eq!(rewrite(&once), once, "not idempotent for {input:?}");
    }
}

#[test]
fn length_guard_reports_length_before_warning() {
    let body = "a".repeat(3001);
    let output = rewrite(&body);

    let warning = length_warning(3001, 3000);
    assert_eq!(output, format!("{body}{warning}"));
    assert_eq!(
        output.chars().count(),
        3001 + warning.chars().count()
    );
    assert!(output.contains("O texto possui 3001 caracteres"));
}

#[test]
fn length_guard_at_limit_adds_nothing() {
    let body = "a".repeat(3000);
    assert_eq!(rewrite(&body), body);
}

#[test]
fn length_guard_counts_characters_not_bytes() {
    let body = "ç".repeat(3000);
    assert_eq!(rewrite(&body), body);
}

#[test]
fn length_guard_warns_again_when_reapplied() {
    let pilot = FormatPilot::with_options(Options { character_limit: 10 });
    let once = pilot.rewrite("0123456789ABC");
    let twice = pilot.rewrite(&once);

    assert_eq!(
        twice,
        format!("{once}{}", length_warning(once.chars().count(), 10))
    );
    assert_eq!(twice.matches("⚠️ Atenção").count(), 2);
}

#[test]
fn rewrite_is_shareable_across_threads() {
    let pilot = FormatPilot::new();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pilot = &pilot;
                scope.spawn(move || pilot.rewrite(&format!("<strong>t{i}</strong>")))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("T{i}"));
        }
    });
}
