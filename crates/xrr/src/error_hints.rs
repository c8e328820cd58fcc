use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("no such file or directory")
        || haystack.contains("cannot find the file")
        || haystack.contains("failed to open")
    {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("not found in header") {
        push_hint(
            &mut out,
            "Column names are case-sensitive and must match the CSV header exactly.",
        );
    }

    if haystack.contains("expected `item,annotation` columns") {
        push_hint(
            &mut out,
            "`xrr score` expects two columns per row: the item id, then the annotation.",
        );
    }

    if haystack.contains("unknown mood") {
        push_hint(
            &mut out,
            "Moods are IRep column names such as LOVE, AWE or CONTEMPLATION.",
        );
    }

    if haystack.contains("irep") && haystack.contains("columns") {
        push_hint(
            &mut out,
            "IRep rows need item, platform and rater columns followed by one 0/1 column per mood.",
        );
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("invalid")) {
        push_hint(
            &mut out,
            "Check `xrr.toml` syntax and key names (distance, metric, format, decimals, threads, moods).",
        );
    }

    if haystack.contains("invalid setting") {
        push_hint(
            &mut out,
            "Use `--threads` of at least 1 and `--decimals` of at most 12.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
