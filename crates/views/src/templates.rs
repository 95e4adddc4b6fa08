//! HTML Templates
//!
//! Page templates for the org and team pages. All interpolated text is
//! HTML-escaped.

use orgweb_notices::{Notice, NoticeLevel};

use crate::{AddTeamPage, TeamPage, View, ViewError, ViewRenderer};

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders views as standalone HTML documents
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    site_name: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new("npm")
    }
}

impl HtmlRenderer {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    fn layout(&self, title: &str, notices: &[Notice], content: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {site}</title>
</head>
<body>
    <main class="container">
{notices}{content}
    </main>
</body>
</html>
"#,
            title = escape_html(title),
            site = escape_html(&self.site_name),
            notices = notices_html(notices),
            content = content,
        )
    }

    fn not_found(&self) -> String {
        self.layout(
            "Not Found",
            &[],
            r#"        <h1>Not Found</h1>
        <p>We couldn't find the page you were looking for.</p>"#,
        )
    }

    fn internal_error(&self) -> String {
        self.layout(
            "Internal Error",
            &[],
            r#"        <h1>Something went wrong</h1>
        <p>We hit an unexpected error. Please try again in a moment.</p>"#,
        )
    }

    fn add_team(&self, page: &AddTeamPage) -> String {
        let org = escape_html(&page.org);
        let content = format!(
            r#"        <h1>Create a team in {org}</h1>
        <form method="post" action="/org/{org}/team">
            <label for="team-name">Team name</label>
            <input type="text" id="team-name" name="team-name" required>
            <label for="description">Description</label>
            <textarea id="description" name="description"></textarea>
            <fieldset>
                <legend>Members</legend>
                <input type="text" name="member" placeholder="username">
                <input type="text" name="member" placeholder="username">
                <input type="text" name="member" placeholder="username">
            </fieldset>
            <button type="submit">Create team</button>
        </form>"#,
            org = org
        );
        self.layout(&format!("Add team to {}", page.org), &page.notices, &content)
    }

    fn show_team(&self, page: &TeamPage) -> String {
        let org = escape_html(&page.org_name);
        let team = escape_html(&page.team_name);
        let action = format!("/org/{}/team/{}", org, team);

        let mut content = format!(
            "        <h1>{org}:{team}</h1>\n",
            org = org,
            team = team
        );
        if let Some(description) = &page.description {
            content.push_str(&format!(
                "        <p class=\"description\">{}</p>\n",
                escape_html(description)
            ));
        }

        content.push_str(&format!(
            "        <h2>Members ({})</h2>\n        <ul class=\"members\">\n",
            page.members.len()
        ));
        for member in &page.members {
            content.push_str(&format!(
                "            <li>{}</li>\n",
                escape_html(&member.name)
            ));
        }
        content.push_str("        </ul>\n");

        content.push_str(&format!(
            "        <h2>Packages ({})</h2>\n        <table class=\"packages\">\n",
            page.packages.len()
        ));
        for package in &page.packages {
            let name = escape_html(&package.name);
            let checked = if package.can_write == Some(true) {
                " checked"
            } else {
                ""
            };
            content.push_str(&format!(
                r#"            <tr>
                <td>{name}</td>
                <td>
                    <form method="post" action="{action}">
                        <input type="hidden" name="updateType" value="updateWritePermissions">
                        <input type="hidden" name="name" value="{name}">
                        <label><input type="checkbox" name="writePermission"{checked}> write</label>
                        <button type="submit">Save</button>
                    </form>
                </td>
                <td>
                    <form method="post" action="{action}">
                        <input type="hidden" name="updateType" value="removePackage">
                        <input type="hidden" name="name" value="{name}">
                        <button type="submit">Remove</button>
                    </form>
                </td>
            </tr>
"#,
                name = name,
                action = action,
                checked = checked
            ));
        }
        content.push_str("        </table>");

        self.layout(
            &format!("{}:{}", page.org_name, page.team_name),
            &page.notices,
            &content,
        )
    }
}

fn notices_html(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| {
            let class = match notice.level {
                NoticeLevel::Error => "notice notice-error",
                NoticeLevel::Success => "notice notice-success",
            };
            format!(
                "        <div class=\"{}\">{}</div>\n",
                class,
                escape_html(&notice.message)
            )
        })
        .collect()
}

impl ViewRenderer for HtmlRenderer {
    fn render(&self, view: &View) -> Result<String, ViewError> {
        let html = match view {
            View::NotFound => self.not_found(),
            View::InternalError => self.internal_error(),
            View::AddTeam(page) => {
                if page.org.is_empty() {
                    return Err(ViewError::Template(
                        "org/add-team requires an org name".to_string(),
                    ));
                }
                self.add_team(page)
            }
            View::ShowTeam(page) => self.show_team(page),
        };
        Ok(html)
    }
}
