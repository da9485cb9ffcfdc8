use crate::models::StatsRecord;

pub fn render_index(stats: &StatsRecord) -> String {
    INDEX_HTML
        .replace("{{TOTAL}}", &stats.total_count.to_string())
        .replace("{{TODAY}}", &stats.today.count.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>DoomStop</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4f1;
      --bg-2: #b9e0d2;
      --ink: #22302b;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --accent-3: #3d9970;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3f1ea 60%, #f4f8f6 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .panel,
    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    #trivia-btn { background: var(--accent-2); }
    #meme-btn { background: var(--accent); }
    #quick-win-btn { background: var(--accent-3); }

    .content {
      min-height: 120px;
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
      align-content: start;
    }

    .content p {
      margin: 0;
      font-size: 1.1rem;
    }

    .loop-btn {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .status {
      font-size: 0.95rem;
      color: #c63b2b;
      min-height: 1.2em;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>DoomStop</h1>
      <p class="subtitle">Swap a minute of scrolling for a tiny win.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total escapes</span>
        <span id="totalEscapes" class="value">{{TOTAL}}</span>
      </div>
      <div class="stat">
        <span class="label">Today</span>
        <span id="todayEscapes" class="value">{{TODAY}}</span>
      </div>
    </section>

    <section class="actions">
      <button id="trivia-btn" type="button">Trivia</button>
      <button id="meme-btn" type="button">Meme</button>
      <button id="quick-win-btn" type="button">Quick win</button>
    </section>

    <section id="content" class="content"></section>
    <div class="status" id="status"></div>
  </main>

  <script>
    const contentEl = document.getElementById('content');
    const totalEl = document.getElementById('totalEscapes');
    const todayEl = document.getElementById('todayEscapes');
    const statusEl = document.getElementById('status');

    const showText = (text) => {
      const p = document.createElement('p');
      p.textContent = text;
      contentEl.replaceChildren(p);
    };

    const call = async (path, body) => {
      statusEl.textContent = '';
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const render = (outcome) => {
      if (outcome.state === 'presenting') {
        showText(outcome.question);
        outcome.options.forEach((option) => {
          const btn = document.createElement('button');
          btn.type = 'button';
          btn.className = 'loop-btn';
          btn.textContent = option;
          btn.addEventListener('click', () => {
            call('/api/loops/trivia/answer', { choice: option })
              .then(render)
              .catch((err) => { statusEl.textContent = err.message; });
          });
          contentEl.appendChild(btn);
        });
        return;
      }
      showText(outcome.message);
      totalEl.textContent = outcome.stats.total_count;
      todayEl.textContent = outcome.stats.today.count;
    };

    const bind = (id, path) => {
      document.getElementById(id).addEventListener('click', () => {
        call(path).then(render).catch((err) => { statusEl.textContent = err.message; });
      });
    };

    bind('trivia-btn', '/api/loops/trivia');
    bind('meme-btn', '/api/loops/meme');
    bind('quick-win-btn', '/api/loops/quick_win');
  </script>
</body>
</html>
"#;
