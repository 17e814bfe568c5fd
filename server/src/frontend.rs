//! Embedded single-page browser client served at `/`.

/// The whole page: markup, styles and script, talking to `/todos`.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Todos</title>
<style>
body{font-family:system-ui,sans-serif;max-width:36rem;margin:3rem auto;padding:0 1rem;color:#222}
form{display:flex;gap:.5rem;margin-bottom:1rem}
input[type=text]{flex:1;padding:.5rem;font-size:1rem}
ul{list-style:none;padding:0}
li{display:flex;align-items:center;gap:.5rem;padding:.4rem 0;border-bottom:1px solid #eee}
li.completed .text{text-decoration:line-through;color:#888}
.text{flex:1;word-break:break-word}
.hidden{display:none}
</style>
</head>
<body>
<h1>Todos</h1>
<form id="todo-form">
  <input id="todo-input" type="text" maxlength="500" placeholder="What needs doing?" autocomplete="off">
  <button type="submit">Add</button>
</form>
<ul id="todos"></ul>
<p id="empty-state" class="hidden">Nothing to do.</p>
<script>
const API = 'todos';
const list = document.getElementById('todos');
const empty = document.getElementById('empty-state');
const input = document.getElementById('todo-input');

async function request(method, path, body) {
  const res = await fetch(path, {
    method,
    headers: body ? {'Content-Type': 'application/json'} : {},
    body: body ? JSON.stringify(body) : undefined,
  });
  if (!res.ok) {
    const err = await res.json().catch(() => ({}));
    throw new Error(err.error || res.statusText);
  }
  return res.status === 204 ? null : res.json();
}

function render(todos) {
  list.replaceChildren();
  empty.classList.toggle('hidden', todos.length > 0);
  for (const todo of todos) {
    const li = document.createElement('li');
    li.className = todo.completed ? 'completed' : '';
    const box = document.createElement('input');
    box.type = 'checkbox';
    box.checked = todo.completed;
    box.addEventListener('change', () => run(() => request('PATCH', `${API}/${todo.id}/complete`)));
    const text = document.createElement('span');
    text.className = 'text';
    text.textContent = todo.text;
    const del = document.createElement('button');
    del.textContent = 'Delete';
    del.addEventListener('click', () => run(() => request('DELETE', `${API}/${todo.id}`)));
    li.append(box, text, del);
    list.append(li);
  }
}

async function run(action) {
  try {
    if (action) await action();
    render(await request('GET', API));
  } catch (e) {
    alert(e.message);
  }
}

document.getElementById('todo-form').addEventListener('submit', (e) => {
  e.preventDefault();
  const text = input.value.trim();
  if (!text) return;
  run(async () => { await request('POST', API, {text}); input.value = ''; });
});

run();
</script>
</body>
</html>
"##;
