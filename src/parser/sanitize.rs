/// Strip emphasis markers, drop trailing whitespace per line, collapse blank
/// runs to a single empty line and trim the whole text. Idempotent.
pub fn sanitize(text: &str) -> String {
    let stripped = text.replace('*', "");
    let mut out: Vec<&str> = Vec::new();

    for line in stripped.lines().map(str::trim_end) {
        if line.is_empty() && out.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }

    out.join("\n").trim().to_string()
}
