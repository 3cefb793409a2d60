use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{SeriesColors, to_hex};
use crate::config::AnimationConfig;
use crate::data::model::TimeSeries;
use crate::frame::Frame;

// ---------------------------------------------------------------------------
// Export document – everything the page needs to replay the animation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportFrame {
    pub time: f64,
    pub title: String,
    pub position: Vec<f64>,
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDocument {
    pub interval_ms: u64,
    pub y_range: [f64; 2],
    pub x_label: String,
    pub y_label: String,
    pub u_label: String,
    pub v_label: String,
    pub u_color: String,
    pub v_color: String,
    pub frames: Vec<ExportFrame>,
}

impl ExportDocument {
    /// Run every time group through the frame builder, in playback order.
    pub fn build(series: &TimeSeries, config: &AnimationConfig, colors: SeriesColors) -> Self {
        let frames = series
            .groups()
            .iter()
            .map(Frame::from_group)
            .map(|frame| ExportFrame {
                time: frame.time.value(),
                title: frame.title(),
                position: frame.position,
                u: frame.u,
                v: frame.v,
            })
            .collect();

        ExportDocument {
            interval_ms: config.interval.as_millis() as u64,
            y_range: [config.y_range.0, config.y_range.1],
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            u_label: config.u_label.clone(),
            v_label: config.v_label.clone(),
            u_color: to_hex(colors.u),
            v_color: to_hex(colors.v),
            frames,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

const DATA_PLACEHOLDER: &str = "{{FRAME_DATA}}";
const TITLE_PLACEHOLDER: &str = "{{PAGE_TITLE}}";

/// `<data>_anim.html`: the input path with the suffix appended verbatim.
pub fn output_path(data: &Path) -> PathBuf {
    let mut name = OsString::from(data.as_os_str());
    name.push("_anim.html");
    PathBuf::from(name)
}

/// Render a self-contained HTML page that replays the animation.
pub fn render_html(
    series: &TimeSeries,
    config: &AnimationConfig,
    colors: SeriesColors,
    page_title: &str,
) -> Result<String> {
    let doc = ExportDocument::build(series, config, colors);
    let json = serde_json::to_string(&doc).context("serializing frame data")?;
    // Keep the payload from closing its <script> element early.
    let json = json.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace(TITLE_PLACEHOLDER, &escape_html(page_title))
        .replace(DATA_PLACEHOLDER, &json))
}

/// Write the animation next to the input file and return where it went.
pub fn save_html(
    data: &Path,
    series: &TimeSeries,
    config: &AnimationConfig,
    colors: SeriesColors,
) -> Result<PathBuf> {
    let out = output_path(data);
    let title = data
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| data.display().to_string());
    let html = render_html(series, config, colors, &title)?;
    std::fs::write(&out, html)
        .with_context(|| format!("writing animation to {}", out.display()))?;
    log::info!("Saved {} frames to {}", series.len(), out.display());
    Ok(out)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{PAGE_TITLE}}</title>
<style>
  body { font-family: sans-serif; margin: 1em; }
  #controls { margin-top: 0.5em; }
  #controls button { min-width: 2.5em; }
  #slider { width: 640px; }
</style>
</head>
<body>
<canvas id="plot" width="800" height="520"></canvas>
<div>
  <input id="slider" type="range" min="0" value="0" step="1">
</div>
<div id="controls">
  <button id="first" title="First frame">|&lt;</button>
  <button id="prev" title="Previous frame">&lt;</button>
  <button id="play" title="Play / pause">Pause</button>
  <button id="next" title="Next frame">&gt;</button>
  <button id="last" title="Last frame">&gt;|</button>
  <label><input id="loop" type="checkbox" checked> loop</label>
</div>
<script id="frame-data" type="application/json">{{FRAME_DATA}}</script>
<script>
(function () {
  "use strict";
  const doc = JSON.parse(document.getElementById("frame-data").textContent);
  const frames = doc.frames;
  const canvas = document.getElementById("plot");
  const ctx = canvas.getContext("2d");
  const slider = document.getElementById("slider");
  const playBtn = document.getElementById("play");
  const loopBox = document.getElementById("loop");
  const margin = { left: 70, right: 20, top: 40, bottom: 55 };
  const [yMin, yMax] = doc.y_range;
  let current = 0;
  let timer = null;

  slider.max = Math.max(frames.length - 1, 0);

  function ticks(lo, hi, n) {
    const out = [];
    for (let i = 0; i <= n; i++) out.push(lo + (hi - lo) * i / n);
    return out;
  }

  function draw(index) {
    const f = frames[index];
    const w = canvas.width - margin.left - margin.right;
    const h = canvas.height - margin.top - margin.bottom;
    let xMin = f.position.reduce((a, b) => Math.min(a, b), Infinity);
    let xMax = f.position.reduce((a, b) => Math.max(a, b), -Infinity);
    if (!(xMax > xMin)) { xMin -= 0.5; xMax += 0.5; }
    const sx = x => margin.left + (x - xMin) / (xMax - xMin) * w;
    const sy = y => margin.top + (yMax - y) / (yMax - yMin) * h;

    ctx.clearRect(0, 0, canvas.width, canvas.height);
    ctx.fillStyle = "#000";
    ctx.strokeStyle = "#000";
    ctx.lineWidth = 1;
    ctx.strokeRect(margin.left, margin.top, w, h);

    ctx.font = "12px sans-serif";
    ctx.textAlign = "center";
    ctx.textBaseline = "top";
    for (const t of ticks(xMin, xMax, 5)) {
      ctx.fillText(+t.toPrecision(4), sx(t), margin.top + h + 6);
    }
    ctx.textAlign = "right";
    ctx.textBaseline = "middle";
    for (const t of ticks(yMin, yMax, 6)) {
      ctx.fillText(+t.toPrecision(4), margin.left - 6, sy(t));
    }

    ctx.font = "14px sans-serif";
    ctx.textAlign = "center";
    ctx.textBaseline = "bottom";
    ctx.fillText(f.title, margin.left + w / 2, margin.top - 10);
    ctx.fillText(doc.x_label, margin.left + w / 2, canvas.height - 10);
    ctx.save();
    ctx.translate(18, margin.top + h / 2);
    ctx.rotate(-Math.PI / 2);
    ctx.textBaseline = "top";
    ctx.fillText(doc.y_label, 0, 0);
    ctx.restore();

    ctx.save();
    ctx.beginPath();
    ctx.rect(margin.left, margin.top, w, h);
    ctx.clip();
    line(f.position, f.u, doc.u_color, sx, sy);
    line(f.position, f.v, doc.v_color, sx, sy);
    ctx.restore();

    legend([[doc.u_label, doc.u_color], [doc.v_label, doc.v_color]], margin.left + w - 90, margin.top + 10);
    slider.value = index;
  }

  function line(xs, ys, color, sx, sy) {
    ctx.strokeStyle = color;
    ctx.lineWidth = 1.5;
    ctx.beginPath();
    for (let i = 0; i < xs.length; i++) {
      if (i === 0) ctx.moveTo(sx(xs[i]), sy(ys[i]));
      else ctx.lineTo(sx(xs[i]), sy(ys[i]));
    }
    ctx.stroke();
  }

  function legend(entries, x, y) {
    ctx.font = "12px sans-serif";
    ctx.textAlign = "left";
    ctx.textBaseline = "middle";
    ctx.fillStyle = "rgba(255,255,255,0.8)";
    ctx.fillRect(x - 6, y - 4, 86, entries.length * 18 + 4);
    entries.forEach(([label, color], i) => {
      const ly = y + 7 + i * 18;
      ctx.strokeStyle = color;
      ctx.lineWidth = 2;
      ctx.beginPath();
      ctx.moveTo(x, ly);
      ctx.lineTo(x + 24, ly);
      ctx.stroke();
      ctx.fillStyle = "#000";
      ctx.fillText(label, x + 30, ly);
    });
  }

  function show(index) {
    current = index;
    draw(current);
  }

  function advance() {
    if (current + 1 < frames.length) show(current + 1);
    else if (loopBox.checked) show(0);
    else pause();
  }

  function play() {
    if (timer === null) timer = setInterval(advance, doc.interval_ms);
    playBtn.textContent = "Pause";
  }

  function pause() {
    if (timer !== null) clearInterval(timer);
    timer = null;
    playBtn.textContent = "Play";
  }

  playBtn.onclick = () => (timer === null ? play() : pause());
  document.getElementById("first").onclick = () => { pause(); show(0); };
  document.getElementById("last").onclick = () => { pause(); show(frames.length - 1); };
  document.getElementById("prev").onclick = () => { pause(); show((current - 1 + frames.length) % frames.length); };
  document.getElementById("next").onclick = () => { pause(); show((current + 1) % frames.length); };
  slider.oninput = () => { pause(); show(Number(slider.value)); };

  if (frames.length > 0) {
    show(0);
    play();
  }
})();
</script>
</body>
</html>
"##;
