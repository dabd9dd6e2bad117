// Shared by the benchmark files in this directory.
#[allow(dead_code)]
pub fn generate_document(size: usize) -> String {
    let base = "# Title\n\nParagraph with *some* **content** and a [link](https://example.com).\n\n- Bullet point\n  1. Nested item\n- Another item\n\n|textbox>\n|title>Note<title|\n|content>Boxed `code` and $x^2$.<content|\n<textbox|\n\n```[lang=rust]\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_cited_document(entries: usize) -> String {
    let mut bib = String::from("{\"bibliography\": [");
    let mut body = String::new();
    for i in 0..entries {
        if i > 0 {
            bib.push(',');
        }
        bib.push_str(&format!(
            "{{\"tag\": \"t{i}\", \"type\": \"book\", \"data\": {{\"title\": \"Book {i}\"}}}}"
        ));
        body.push_str(&format!("Cites |ref>t{i}<ref| here.\n\n"));
    }
    bib.push_str("]}");
    format!("|meta>\n|bibinfo>[inline=true]\n{bib}\n<bibinfo|\n<meta|\n\n{body}|bibliography><bibliography|\n")
}
