use crate::history::{escape_html, RenderableEntry};
use crate::notify::{Notice, NoticeKind};
use crate::session::PageModel;
use crate::view::{Tone, ViewCommands};
use std::fmt::Write;

pub const SAMPLES: [&str; 4] = [
    "I absolutely love this product! It exceeded all my expectations.",
    "This was the worst customer service experience I've ever had.",
    "The package arrived on Tuesday and contained three items.",
    "The movie was okay, some parts were great but the ending felt rushed.",
];

/// Fills the `{{SLOT}}` markers of the page template in a single pass, so
/// text substituted into one slot is never scanned for further markers.
pub fn render_page(page: &PageModel) -> String {
    let mut html = String::with_capacity(INDEX_HTML.len() + 4096);
    let mut rest = INDEX_HTML;
    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            html.push_str(&rest[start..]);
            return html;
        };
        match slot(&after[..end], page) {
            Some(value) => html.push_str(&value),
            None => html.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    html.push_str(rest);
    html
}

fn slot(name: &str, page: &PageModel) -> Option<String> {
    let value = match name {
        "THEME" => page.theme.as_str().to_string(),
        "DRAFT" => escape_html(&page.draft),
        "SAMPLES" => render_samples(),
        "RESULT" => render_result(page.view.as_ref()),
        "HISTORY" => render_history(&page.history),
        "NOTICES" => render_notices(&page.notices),
        _ => return None,
    };
    Some(value)
}

fn render_notices(notices: &[Notice]) -> String {
    let mut html = String::new();
    for notice in notices {
        match notice.kind {
            NoticeKind::Celebrate => html.push_str(CONFETTI_HTML),
            NoticeKind::Error | NoticeKind::Info => {
                let _ = write!(
                    html,
                    r#"<div class="toast {kind}" role="status">{message}</div>"#,
                    kind = if notice.kind == NoticeKind::Error { "error" } else { "info" },
                    message = escape_html(&notice.message),
                );
            }
        }
    }
    html
}

fn render_samples() -> String {
    let mut html = String::new();
    for sample in SAMPLES {
        let escaped = escape_html(sample);
        let _ = write!(
            html,
            r#"<form method="get" action="/"><input type="hidden" name="draft" value="{escaped}"><button class="chip" type="submit">{escaped}</button></form>"#,
        );
    }
    html
}

fn render_result(view: Option<&ViewCommands>) -> String {
    let Some(view) = view else {
        return r#"<div id="placeholder-state" class="placeholder">Enter some text and press Analyze to see its sentiment.</div>"#
            .to_string();
    };

    format!(
        r#"<div id="results-content" class="results">
      <div class="gauge">
        <div class="gauge-dial"></div>
        <div id="gauge-needle" class="gauge-needle" style="transform: rotate({angle:.1}deg); background: {gauge_color};"></div>
      </div>
      <div id="gauge-label-text" class="sentiment-label {tone}" style="color: {label_color};">{label}</div>
      <div class="metric-row">
        <span class="metric-name">Polarity</span>
        <span id="polarity-display" class="metric-value">{polarity}</span>
      </div>
      <div class="metric-row">
        <span class="metric-name">Subjectivity</span>
        <span id="subjectivity-value" class="metric-value">{subjectivity}</span>
      </div>
      <div class="bar"><div class="bar-fill" style="width: {subjectivity_fill:.1}%;"></div></div>
      <div class="metric-row">
        <span class="metric-name">Confidence</span>
        <span id="confidence-display" class="metric-value">{confidence}</span>
      </div>
      <div class="bar"><div class="bar-fill {tone}" style="width: {confidence_fill:.1}%;"></div></div>
    </div>"#,
        angle = view.gauge.angle_deg,
        gauge_color = view.gauge.tone.color(),
        tone = view.tone.css_class(),
        label_color = view.tone.color(),
        label = view.label,
        polarity = view.gauge.polarity_text,
        subjectivity = view.subjectivity.display,
        subjectivity_fill = view.subjectivity.fill_percent,
        confidence = view.confidence.display,
        confidence_fill = view.confidence.fill_percent,
    )
}

fn render_history(rows: &[RenderableEntry]) -> String {
    let mut html = String::new();
    for row in rows {
        match row {
            RenderableEntry::Placeholder { text } => {
                let _ = write!(html, r#"<p class="history-empty">{text}</p>"#);
            }
            RenderableEntry::Entry {
                index,
                text,
                sentiment,
            } => {
                let _ = write!(
                    html,
                    r#"<form method="post" action="/history/{index}/replay"><button class="history-item" type="submit"><span class="history-text">{text}</span><span class="history-badge {class}">{badge}</span></button></form>"#,
                    class = Tone::from(*sentiment).css_class(),
                    badge = sentiment.display_name().to_uppercase(),
                );
            }
        }
    }
    html
}

const CONFETTI_HTML: &str = r#"<div class="confetti" aria-hidden="true"><i></i><i></i><i></i><i></i><i></i><i></i><i></i><i></i><i></i><i></i><i></i><i></i></div>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sentiment Analyzer</title>
  <style>
    :root {
      --bg: #f4f4f5;
      --card: #ffffff;
      --text-main: #18181b;
      --text-muted: #71717a;
      --border: rgba(24, 24, 27, 0.1);
      --success: #10b981;
      --danger: #ef4444;
      --neutral: #a1a1aa;
      --accent: #6366f1;
      --shadow-lg: 0 20px 40px rgba(0, 0, 0, 0.15);
    }

    [data-theme="dark"] {
      --bg: #09090b;
      --card: #18181b;
      --text-main: #fafafa;
      --text-muted: #a1a1aa;
      --border: rgba(255, 255, 255, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--text-main);
      font-family: "Inter", "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1040px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 3vw, 2.2rem);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
      gap: 24px;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
      align-content: start;
    }

    textarea {
      width: 100%;
      min-height: 160px;
      resize: vertical;
      border-radius: 14px;
      border: 1px solid var(--border);
      background: transparent;
      color: inherit;
      padding: 14px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.5;
      cursor: progress;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
    }

    .btn-ghost {
      background: transparent;
      color: var(--text-muted);
      border: 1px solid var(--border);
    }

    .actions,
    .chips {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
    }

    .chips form {
      margin: 0;
    }

    .chip {
      background: rgba(99, 102, 241, 0.12);
      color: var(--text-main);
      font-weight: 500;
      font-size: 0.85rem;
      padding: 8px 14px;
      max-width: 280px;
      white-space: nowrap;
      overflow: hidden;
      text-overflow: ellipsis;
    }

    .hint {
      color: var(--text-muted);
      font-size: 0.85rem;
      margin: 0;
    }

    .placeholder {
      color: var(--text-muted);
      text-align: center;
      padding: 48px 0;
    }

    .gauge {
      position: relative;
      width: 220px;
      height: 110px;
      margin: 0 auto;
      overflow: hidden;
    }

    .gauge-dial {
      width: 220px;
      height: 220px;
      border-radius: 50%;
      background: conic-gradient(from 270deg, var(--danger), var(--neutral) 90deg, var(--success) 180deg, transparent 180deg);
    }

    .gauge-needle {
      position: absolute;
      left: 10px;
      bottom: 0;
      width: 100px;
      height: 4px;
      border-radius: 2px;
      transform-origin: 100px 2px;
      transition: transform 600ms ease;
    }

    .sentiment-label {
      text-align: center;
      font-size: 1.6rem;
      font-weight: 700;
      letter-spacing: 0.08em;
      text-transform: uppercase;
    }

    .metric-row {
      display: flex;
      justify-content: space-between;
    }

    .metric-name {
      color: var(--text-muted);
    }

    .bar {
      height: 8px;
      border-radius: 999px;
      background: var(--border);
      overflow: hidden;
    }

    .bar-fill {
      height: 100%;
      background: var(--accent);
      transition: width 600ms ease;
    }

    .bar-fill.success { background: var(--success); }
    .bar-fill.danger { background: var(--danger); }
    .bar-fill.neutral { background: var(--neutral); }

    .history-head {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .history-head h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    #history-list {
      display: grid;
      gap: 8px;
    }

    #history-list form {
      margin: 0;
    }

    .history-item {
      width: 100%;
      display: flex;
      justify-content: space-between;
      gap: 12px;
      border-radius: 12px;
      background: transparent;
      border: 1px solid var(--border);
      color: inherit;
      text-align: left;
      font-weight: 400;
    }

    .history-text {
      overflow: hidden;
      white-space: nowrap;
      text-overflow: ellipsis;
    }

    .history-badge.success { color: var(--success); }
    .history-badge.danger { color: var(--danger); }
    .history-badge.neutral { color: var(--neutral); }

    .history-empty {
      color: var(--text-muted);
      font-size: 0.9rem;
      text-align: center;
    }

    .toasts {
      position: fixed;
      bottom: 20px;
      right: 20px;
      display: grid;
      gap: 10px;
      z-index: 2000;
    }

    .toast {
      color: white;
      padding: 1rem 1.5rem;
      border-radius: 0.5rem;
      box-shadow: var(--shadow-lg);
      animation: slideIn 0.3s ease-out, fadeOut 0.3s ease-in 3s forwards;
    }

    .toast.error { background: var(--danger); }
    .toast.info { background: var(--accent); }

    .confetti {
      position: fixed;
      top: 50%;
      left: 50%;
      pointer-events: none;
      z-index: 9999;
    }

    .confetti i {
      position: absolute;
      width: 8px;
      height: 8px;
      border-radius: 50%;
      animation: burst 1s ease-out forwards;
    }

    .confetti i:nth-child(3n) { background: #f00; --dx: 140px; --dy: -120px; }
    .confetti i:nth-child(3n + 1) { background: #0f0; --dx: -160px; --dy: -60px; }
    .confetti i:nth-child(3n + 2) { background: #00f; --dx: 90px; --dy: 150px; }
    .confetti i:nth-child(4n) { --dx: -110px; --dy: 170px; }
    .confetti i:nth-child(5n) { --dx: 200px; --dy: 20px; }

    @keyframes burst {
      from { transform: translate(0, 0); opacity: 1; }
      to { transform: translate(var(--dx), var(--dy)); opacity: 0; }
    }

    @keyframes slideIn {
      from { transform: translateY(16px); opacity: 0; }
      to { transform: translateY(0); opacity: 1; }
    }

    @keyframes fadeOut {
      to { opacity: 0; visibility: hidden; }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Sentiment Analyzer</h1>
      <form method="post" action="/theme/toggle">
        <button id="theme-toggle" class="btn-ghost" type="submit">Toggle theme</button>
      </form>
    </header>

    <div class="grid">
      <section class="card">
        <form id="analyze-form" method="post" action="/analyze">
          <textarea id="text-input" name="text" placeholder="Type or paste text to analyze...">{{DRAFT}}</textarea>
          <div class="actions">
            <button id="analyze-btn" class="btn-primary" type="submit">Analyze</button>
            <button id="clear-btn" class="btn-ghost" type="submit" formaction="/draft/clear">Clear</button>
          </div>
        </form>
        <p class="hint">Press Ctrl+Enter (or Cmd+Enter) to analyze.</p>
        <div class="chips">{{SAMPLES}}</div>
      </section>

      <section class="card">
        {{RESULT}}
      </section>

      <section class="card">
        <div class="history-head">
          <h2>Recent analysis</h2>
          <form method="post" action="/history/clear">
            <button id="clear-history" class="btn-ghost" type="submit">Clear history</button>
          </form>
        </div>
        <div id="history-list">{{HISTORY}}</div>
      </section>
    </div>
  </main>

  <div class="toasts">{{NOTICES}}</div>

  <script>
    const form = document.getElementById('analyze-form');
    const input = document.getElementById('text-input');
    const analyzeBtn = document.getElementById('analyze-btn');

    form.addEventListener('submit', (event) => {
      if (event.submitter && event.submitter.id === 'analyze-btn') {
        analyzeBtn.disabled = true;
        analyzeBtn.textContent = 'Analyzing...';
      }
    });

    input.addEventListener('keydown', (event) => {
      if (event.key === 'Enter' && (event.ctrlKey || event.metaKey) && !analyzeBtn.disabled) {
        event.preventDefault();
        form.requestSubmit(analyzeBtn);
      }
    });
  </script>
</body>
</html>
"#;
