//! String template rendering utilities.

pub struct TemplateVars;

impl TemplateVars {
    pub const PACKAGE: &'static str = "package";
    pub const SOURCE: &'static str = "source";
}

pub fn render(template: &str, variables: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in variables {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_placeholders() {
        let rendered = render(
            "/S /log {{package}}.log",
            &[(TemplateVars::PACKAGE, "7-Zip")],
        );
        assert_eq!(rendered, "/S /log 7-Zip.log");
    }

    #[test]
    fn render_replaces_repeated_placeholders() {
        let rendered = render("{{source}} -> {{source}}", &[(TemplateVars::SOURCE, "a.msi")]);
        assert_eq!(rendered, "a.msi -> a.msi");
    }

    #[test]
    fn render_leaves_unknown_placeholders() {
        let rendered = render("{{unknown}}", &[(TemplateVars::PACKAGE, "x")]);
        assert_eq!(rendered, "{{unknown}}");
    }
}
