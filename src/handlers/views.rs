//! Server-rendered pages. Templates are plain HTML with `{{PLACEHOLDER}}`
//! markers; every dynamic value is escaped before substitution.

use crate::services::HabitOverview;
use crate::session::RequestContext;

pub fn render_home(ctx: &RequestContext) -> String {
    // ---
    let greeting = match ctx.user() {
        Some(user) => format!("Welcome back, {}!", escape_html(&user.username)),
        None => "Welcome!".to_string(),
    };

    layout(
        "Green Habits",
        ctx,
        &fill(HOME_HTML, &[("GREETING", greeting.as_str())]),
    )
}

pub fn render_register() -> String {
    // ---
    layout(
        "Register",
        &RequestContext::anonymous(),
        &fill(
            CREDENTIALS_FORM_HTML,
            &[
                ("HEADING", "Create an account"),
                ("ACTION", "/register"),
                ("SUBMIT", "Register"),
            ],
        ),
    )
}

pub fn render_login() -> String {
    // ---
    layout(
        "Login",
        &RequestContext::anonymous(),
        &fill(
            CREDENTIALS_FORM_HTML,
            &[("HEADING", "Log in"), ("ACTION", "/login"), ("SUBMIT", "Login")],
        ),
    )
}

pub fn render_dashboard(ctx: &RequestContext, overview: &HabitOverview, tip: &str) -> String {
    // ---
    let habit_rows: String = overview
        .habits
        .iter()
        .map(|habit| {
            let done = overview.completed_today.contains(&habit.id);
            fill(
                HABIT_ROW_HTML,
                &[
                    ("ID", habit.id.to_string().as_str()),
                    ("NAME", escape_html(&habit.name).as_str()),
                    ("DESCRIPTION", escape_html(&habit.description).as_str()),
                    ("POINTS", habit.points.to_string().as_str()),
                    ("STATE", if done { "done" } else { "open" }),
                    ("DISABLED", if done { " disabled" } else { "" }),
                    ("LABEL", if done { "Done today" } else { "Complete" }),
                ],
            )
        })
        .collect();

    let body = fill(
        DASHBOARD_HTML,
        &[
            ("DATE", overview.today.to_string().as_str()),
            ("POINTS", overview.totals.total_points.to_string().as_str()),
            ("CARBON", format!("{:.2}", overview.totals.rounded_carbon()).as_str()),
            ("STREAK", overview.current_streak.to_string().as_str()),
            ("COMPLETIONS", overview.totals.completions.to_string().as_str()),
            ("LEVEL", overview.level.name),
            ("LEVEL_NUMBER", overview.level.number.to_string().as_str()),
            ("TIP", escape_html(tip).as_str()),
            ("HABITS", habit_rows.as_str()),
        ],
    );

    layout("Dashboard", ctx, &body)
}

fn layout(title: &str, ctx: &RequestContext, body: &str) -> String {
    // ---
    let nav = if ctx.is_authenticated() {
        NAV_SIGNED_IN
    } else {
        NAV_SIGNED_OUT
    };

    fill(
        LAYOUT_HTML,
        &[("TITLE", title), ("NAV", nav), ("BODY", body)],
    )
}

/// Replace each `{{KEY}}` marker in one left-to-right pass. Substituted
/// values are never scanned again, and unknown markers are kept verbatim.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    // ---
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];

        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

fn escape_html(raw: &str) -> String {
    // ---
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

const NAV_SIGNED_IN: &str =
    r#"<a href="/">Home</a> <a href="/dashboard">Dashboard</a> <a href="/logout">Logout</a>"#;

const NAV_SIGNED_OUT: &str = r#"<a href="/">Home</a> <a href="/dashboard">Dashboard</a> <a href="/login">Login</a> <a href="/register">Register</a>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #eef6ee;
      --ink: #1f2d24;
      --accent: #2f855a;
      --card: #ffffff;
      --muted: #5b6b60;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    nav {
      display: flex;
      gap: 16px;
      padding: 16px 24px;
      background: var(--accent);
    }

    nav a {
      color: #fff;
      text-decoration: none;
      font-weight: 600;
    }

    main {
      width: min(860px, 100%);
      margin: 32px auto;
      padding: 0 18px;
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      padding: 24px;
      box-shadow: 0 12px 30px rgba(31, 45, 36, 0.08);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 16px;
    }

    .stat strong {
      display: block;
      font-size: 1.8rem;
    }

    .habit {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 12px 0;
      border-bottom: 1px solid #e2ebe4;
    }

    .habit p {
      margin: 4px 0 0;
      color: var(--muted);
    }

    button {
      border: 0;
      border-radius: 999px;
      padding: 10px 18px;
      background: var(--accent);
      color: #fff;
      font-weight: 600;
      cursor: pointer;
    }

    button:disabled {
      background: #a0b8a8;
      cursor: default;
    }

    form {
      display: grid;
      gap: 12px;
      max-width: 320px;
    }

    input {
      padding: 10px;
      border-radius: 8px;
      border: 1px solid #c5d3c9;
    }
  </style>
</head>
<body>
  <nav>{{NAV}}</nav>
  <main>
{{BODY}}
  </main>
</body>
</html>
"#;

const HOME_HTML: &str = r#"    <section class="card">
      <h1>Green Habits</h1>
      <p>{{GREETING}}</p>
      <p>Track small sustainable actions every day, earn points, watch your CO<sub>2</sub>
      savings add up and keep your streak alive.</p>
      <p><a href="/dashboard">Open the dashboard</a></p>
    </section>"#;

const CREDENTIALS_FORM_HTML: &str = r#"    <section class="card">
      <h1>{{HEADING}}</h1>
      <form method="post" action="{{ACTION}}">
        <input name="username" placeholder="Username" required />
        <input name="password" type="password" placeholder="Password" required />
        <button type="submit">{{SUBMIT}}</button>
      </form>
    </section>"#;

const HABIT_ROW_HTML: &str = r#"        <div class="habit {{STATE}}" data-habit-id="{{ID}}">
          <div>
            <strong>{{NAME}}</strong> <span>+{{POINTS}} pts</span>
            <p>{{DESCRIPTION}}</p>
          </div>
          <button type="button" data-complete="{{ID}}"{{DISABLED}}>{{LABEL}}</button>
        </div>
"#;

const DASHBOARD_HTML: &str = r#"    <section class="card">
      <h1>Dashboard</h1>
      <p>Today is {{DATE}}.</p>
      <div class="stats">
        <div class="stat"><strong id="total-points">{{POINTS}}</strong>points</div>
        <div class="stat"><strong id="total-carbon">{{CARBON}}</strong>kg CO<sub>2</sub> saved</div>
        <div class="stat"><strong id="current-streak">{{STREAK}}</strong>day streak</div>
        <div class="stat"><strong id="completions">{{COMPLETIONS}}</strong>habits completed</div>
        <div class="stat"><strong id="level-name">{{LEVEL}}</strong>level <span id="level-number">{{LEVEL_NUMBER}}</span></div>
      </div>
    </section>

    <section class="card">
      <h2>Tip of the day</h2>
      <p id="tip">{{TIP}}</p>
      <button type="button" id="new-tip">Another tip</button>
    </section>

    <section class="card">
      <h2>Habits</h2>
{{HABITS}}      <p id="message" role="status"></p>
    </section>

    <script>
      const message = document.getElementById("message");

      document.querySelectorAll("[data-complete]").forEach((button) => {
        button.addEventListener("click", async () => {
          const response = await fetch("/api/complete-habit", {
            method: "POST",
            headers: { "Content-Type": "application/json" },
            body: JSON.stringify({ habit_id: Number(button.dataset.complete) }),
          });
          const data = await response.json();
          if (!response.ok) {
            message.textContent = data.error;
            return;
          }
          button.disabled = true;
          button.textContent = "Done today";
          document.getElementById("total-points").textContent = data.total_points;
          document.getElementById("total-carbon").textContent = data.total_carbon_saved.toFixed(2);
          document.getElementById("current-streak").textContent = data.current_streak;
          document.getElementById("level-name").textContent = data.level_name;
          document.getElementById("level-number").textContent = data.level;
          const completions = document.getElementById("completions");
          completions.textContent = Number(completions.textContent) + 1;
          message.textContent = `+${data.points_earned} points, ${data.carbon_saved} kg CO2 saved!`;
        });
      });

      document.getElementById("new-tip").addEventListener("click", async () => {
        const response = await fetch("/api/new-tip");
        const data = await response.json();
        document.getElementById("tip").textContent = data.tip;
      });
    </script>"#;
