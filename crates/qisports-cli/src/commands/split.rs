use anyhow::Result;

use qisports_core::controllers::split_words;

pub fn run(text: &str, json: bool) -> Result<()> {
    let fragments = split_words(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&fragments)?);
    } else {
        print!("{}", format_fragments(&fragments));
    }
    Ok(())
}

fn format_fragments(fragments: &[String]) -> String {
    let mut out = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        out.push_str(&format!("{:>3}  {:?}\n", i + 1, fragment));
    }
    out.push_str(&format!("{} fragment(s)\n", fragments.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fragments() {
        let out = format_fragments(&split_words("Our Services"));
        assert_eq!(out, "  1  \"Our \"\n  2  \"Services\"\n2 fragment(s)\n");
        assert_eq!(format_fragments(&split_words("")), "0 fragment(s)\n");
    }
}
