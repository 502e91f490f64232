pub const APP_STYLE: &str = r#"
:root {
    color-scheme: dark;
    font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    background-color: #07110c;
    color: #f3fbf5;
}

body {
    margin: 0;
}

.app {
    display: flex;
    flex-direction: column;
    min-height: 100vh;
}

header {
    padding: 20px 32px 14px;
    display: flex;
    align-items: flex-end;
    justify-content: space-between;
    border-bottom: 1px solid rgba(196, 240, 88, 0.2);
    background: linear-gradient(180deg, rgba(12, 32, 20, 0.9), rgba(7, 17, 12, 0.6));
}

header .branding {
    display: flex;
    flex-direction: column;
    gap: 4px;
}

header .title {
    font-size: 26px;
    font-weight: 700;
    letter-spacing: 0.08em;
    text-transform: uppercase;
}

header .subtitle {
    font-size: 15px;
    color: rgba(236, 250, 240, 0.7);
}

.status-pill {
    padding: 4px 12px;
    border-radius: 999px;
    font-size: 12px;
    letter-spacing: 0.08em;
    text-transform: uppercase;
    border: 1px solid currentColor;
}

.status-pill.loading { color: rgba(255, 214, 138, 0.9); }
.status-pill.ready { color: rgba(196, 240, 88, 0.95); }
.status-pill.failed { color: rgba(255, 150, 150, 0.9); }

main {
    display: grid;
    grid-template-columns: 1fr 340px;
    gap: 24px;
    padding: 24px 32px 48px;
}

.content,
.sidebar {
    display: flex;
    flex-direction: column;
    gap: 20px;
}

.panel {
    background: rgba(14, 34, 22, 0.9);
    border-radius: 14px;
    border: 1px solid rgba(196, 240, 88, 0.16);
    padding: 16px 20px;
    display: flex;
    flex-direction: column;
    gap: 12px;
}

.panel h2 {
    margin: 0;
    font-size: 18px;
    letter-spacing: 0.05em;
    text-transform: uppercase;
}

.panel p {
    margin: 0;
    font-size: 14px;
}

.helper {
    color: rgba(236, 250, 240, 0.65);
}

.error-container .error {
    color: rgba(255, 150, 150, 0.95);
    font-weight: 600;
}

code {
    font-family: 'JetBrains Mono', 'SFMono-Regular', monospace;
    font-size: 13px;
    color: rgba(196, 240, 88, 0.9);
}

.stage canvas {
    border: 1px solid #333;
    border-radius: 6px;
    max-width: 100%;
    outline: none;
}

.slider {
    display: grid;
    grid-template-columns: 84px 1fr 64px;
    align-items: center;
    gap: 10px;
    font-size: 14px;
}

.slider input[type="range"] {
    accent-color: #c4f058;
}

.slider-value {
    text-align: right;
    font-variant-numeric: tabular-nums;
}

.actions {
    display: flex;
    gap: 12px;
}

button {
    background: linear-gradient(120deg, #d8f56a, #8fd14f);
    border: none;
    border-radius: 999px;
    padding: 10px 18px;
    color: #07110c;
    font-weight: 600;
    letter-spacing: 0.05em;
    text-transform: uppercase;
    cursor: pointer;
}

button.secondary {
    background: rgba(196, 240, 88, 0.1);
    color: rgba(236, 250, 240, 0.8);
    border: 1px solid rgba(196, 240, 88, 0.3);
}

button:disabled {
    opacity: 0.4;
    cursor: not-allowed;
}

.log-feed {
    max-height: 280px;
    overflow-y: auto;
    background: rgba(4, 12, 8, 0.65);
    border-radius: 10px;
    padding: 10px 12px;
    font-family: 'JetBrains Mono', 'SFMono-Regular', monospace;
    font-size: 12px;
    display: flex;
    flex-direction: column;
    gap: 8px;
}

.log-line {
    display: flex;
    gap: 8px;
}

.log-line .ts {
    color: rgba(196, 240, 88, 0.6);
}

.log-line .source {
    padding: 0 6px;
    border-radius: 4px;
    background: rgba(196, 240, 88, 0.12);
    text-transform: uppercase;
    font-size: 10px;
    line-height: 16px;
}

.log-line.module {
    opacity: 0.85;
}

.panel-heading {
    display: flex;
    align-items: center;
    justify-content: space-between;
}

button.compact {
    padding: 4px 10px;
    font-size: 11px;
}

.log-line.info { color: rgba(236, 250, 240, 0.72); }
.log-line.success { color: rgba(170, 255, 190, 0.86); }
.log-line.warn { color: rgba(255, 214, 138, 0.9); }
.log-line.error { color: rgba(255, 150, 150, 0.9); }
"#;
