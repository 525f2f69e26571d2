/// Minimal document holding the hidden video and canvas elements.
pub const CAPTURE_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
  </head>
  <body>
    <video id="video" style="display:none;"></video>
    <canvas id="canvas" style="display:none;"></canvas>
  </body>
</html>"#;

/// Removes and returns the events recorded since the last drain.
pub const DRAIN_EVENTS_SCRIPT: &str =
    "(() => { const c = window.__firstframe; return c ? c.events.splice(0) : []; })()";

const INSTALL_TEMPLATE: &str = r#"(() => {
  const video = document.getElementById('video');
  const canvas = document.getElementById('canvas');
  const events = [];
  let captured = false;
  window.__firstframe = { events };

  video.onloadedmetadata = () => {
    canvas.width = video.videoWidth;
    canvas.height = video.videoHeight;
    events.push({ type: 'metadata', width: video.videoWidth, height: video.videoHeight });
    video.currentTime = 0;
  };

  video.onseeked = () => {
    if (captured) {
      events.push({ type: 'seeked', dataUrl: null });
      return;
    }
    captured = true;
    try {
      const ctx = canvas.getContext('2d');
      if (!ctx) {
        events.push({ type: 'error', message: 'Unable to create canvas context' });
        return;
      }
      ctx.drawImage(video, 0, 0, canvas.width, canvas.height);
      events.push({ type: 'seeked', dataUrl: canvas.toDataURL('image/jpeg', __QUALITY__) });
    } catch (err) {
      events.push({ type: 'error', message: String(err && err.message ? err.message : err) });
    }
  };

  video.onerror = () => {
    const message = video.error && video.error.message ? video.error.message : 'Error loading video';
    events.push({ type: 'loadError', message });
  };

  video.src = __SOURCE__;
  video.load();
  return true;
})()"#;

/// Script wiring the capture handlers and pointing the video at `source_url`.
pub fn install_script(source_url: &str, jpeg_quality: f32) -> String {
    // A JSON string literal is a valid JS string literal.
    let source = serde_json::Value::String(source_url.to_string()).to_string();
    INSTALL_TEMPLATE
        .replace("__QUALITY__", &format!("{}", jpeg_quality))
        .replace("__SOURCE__", &source)
}
