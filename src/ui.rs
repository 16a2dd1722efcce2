use crate::models::HABIT_COLORS;

pub fn render_index(today: &str) -> String {
    let swatches: String = HABIT_COLORS
        .iter()
        .enumerate()
        .map(|(index, color)| {
            let checked = if index == 0 { " checked" } else { "" };
            format!(
                r#"<label class="swatch" style="--swatch: {color}"><input type="radio" name="color" value="{color}"{checked} /><span></span></label>"#
            )
        })
        .collect();

    INDEX_HTML
        .replace("{{TODAY}}", today)
        .replace("{{SWATCHES}}", &swatches)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg: #f6f4ef;
      --ink: #25231f;
      --muted: #77736b;
      --card: #ffffff;
      --line: #e4e0d8;
      --shadow: 0 18px 48px rgba(37, 35, 31, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    h1, h2 {
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
      margin-top: 16px;
    }

    input[type="text"] {
      flex: 1 1 220px;
      padding: 10px 12px;
      border: 1px solid var(--line);
      border-radius: 10px;
      font-size: 1rem;
    }

    .swatch input {
      display: none;
    }

    .swatch span {
      display: inline-block;
      width: 22px;
      height: 22px;
      border-radius: 50%;
      background: var(--swatch);
      border: 3px solid transparent;
      cursor: pointer;
    }

    .swatch input:checked + span {
      border-color: var(--ink);
    }

    button {
      border: none;
      border-radius: 10px;
      padding: 10px 16px;
      font-size: 0.95rem;
      cursor: pointer;
      background: var(--ink);
      color: #fff;
    }

    button.ghost {
      background: transparent;
      color: var(--ink);
      border: 1px solid var(--line);
    }

    .habits {
      list-style: none;
      margin: 16px 0 0;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .habits li {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .habits .dot {
      width: 12px;
      height: 12px;
      border-radius: 50%;
    }

    .habits .name {
      flex: 1;
    }

    .calendar-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
      margin-top: 16px;
    }

    .weekday {
      text-align: center;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .day {
      min-height: 84px;
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 6px;
      display: flex;
      flex-direction: column;
      gap: 4px;
    }

    .day.other {
      opacity: 0.4;
    }

    .day.today {
      border-color: var(--ink);
    }

    .checks {
      display: flex;
      flex-wrap: wrap;
      gap: 4px;
    }

    .check {
      width: 18px;
      height: 18px;
      padding: 0;
      border-radius: 5px;
      border: 2px solid;
      background: transparent;
    }

    .ratio {
      margin-top: auto;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c0392b;
    }
  </style>
</head>
<body>
  <main class="app">
    <section class="card">
      <h1>Habit Tracker</h1>
      <p class="subtitle">Track your daily habits and build lasting routines. Today is {{TODAY}}.</p>
      <form id="add-form">
        <input type="text" id="habit-name" placeholder="New habit" autocomplete="off" />
        {{SWATCHES}}
        <button type="submit">Add habit</button>
      </form>
      <ul class="habits" id="habits"></ul>
    </section>

    <section class="card">
      <div class="calendar-header">
        <button class="ghost" type="button" id="prev">&larr;</button>
        <h2 id="title"></h2>
        <button class="ghost" type="button" id="next">&rarr;</button>
      </div>
      <div class="grid" id="grid"></div>
      <p class="subtitle" id="empty" hidden>Add some habits to start tracking your progress!</p>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const habitsEl = document.getElementById('habits');
    const gridEl = document.getElementById('grid');
    const titleEl = document.getElementById('title');
    const emptyEl = document.getElementById('empty');
    const statusEl = document.getElementById('status');
    const nameEl = document.getElementById('habit-name');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const request = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const renderHabits = (habits) => {
      habitsEl.innerHTML = '';
      habits.forEach((habit) => {
        const item = document.createElement('li');
        const dot = document.createElement('span');
        dot.className = 'dot';
        dot.style.background = habit.color;
        const name = document.createElement('span');
        name.className = 'name';
        name.textContent = habit.name;
        item.append(dot, name);
        const remove = document.createElement('button');
        remove.className = 'ghost';
        remove.textContent = 'Delete';
        remove.addEventListener('click', () => {
          request('DELETE', `/api/habits/${encodeURIComponent(habit.id)}`)
            .then(loadCalendar)
            .catch((err) => setStatus(err.message, 'error'));
        });
        item.appendChild(remove);
        habitsEl.appendChild(item);
      });
    };

    const renderView = (view) => {
      titleEl.textContent = view.title;
      renderHabits(view.habits);
      emptyEl.hidden = view.habits.length > 0;

      const colors = Object.fromEntries(view.habits.map((habit) => [habit.id, habit]));
      gridEl.innerHTML = view.weekdays.map((day) => `<div class="weekday">${day}</div>`).join('');

      view.days.forEach((day) => {
        const cell = document.createElement('div');
        cell.className = `day${day.isCurrentMonth ? '' : ' other'}${day.isToday ? ' today' : ''}`;
        cell.innerHTML = `<strong>${Number(day.date.slice(8))}</strong>`;

        if (day.progress) {
          const checks = document.createElement('div');
          checks.className = 'checks';
          day.habits.forEach((status) => {
            const habit = colors[status.habitId];
            const check = document.createElement('button');
            check.className = 'check';
            check.style.borderColor = habit.color;
            check.style.background = status.completed ? habit.color : 'transparent';
            check.title = `${habit.name} - ${status.completed ? 'Completed' : 'Not completed'}`;
            check.addEventListener('click', () => {
              request('POST', '/api/progress/toggle', { habitId: status.habitId, date: day.date })
                .then(loadCalendar)
                .catch((err) => setStatus(err.message, 'error'));
            });
            checks.appendChild(check);
          });
          cell.appendChild(checks);

          const ratio = document.createElement('div');
          ratio.className = 'ratio';
          ratio.textContent = day.progress;
          cell.appendChild(ratio);
        }

        gridEl.appendChild(cell);
      });
    };

    const loadCalendar = async () => {
      renderView(await request('GET', '/api/calendar'));
    };

    document.getElementById('prev').addEventListener('click', () => {
      request('POST', '/api/calendar/prev').then(renderView).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('next').addEventListener('click', () => {
      request('POST', '/api/calendar/next').then(renderView).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const name = nameEl.value.trim();
      if (!name) {
        return;
      }
      const color = document.querySelector('input[name="color"]:checked').value;
      request('POST', '/api/habits', { name, color })
        .then(() => {
          nameEl.value = '';
          setStatus('', '');
          return loadCalendar();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    loadCalendar().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
