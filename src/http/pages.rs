//! Static HTML served by the configuration surface.
//!
//! Two pages, no templating: the settings form posts to `/SPRINKLER`,
//! and the status page reads its display parameters back out of the
//! query string and runs a client-side countdown. Form defaults are
//! substituted by the server from [`SystemConfig`](crate::config::SystemConfig).

/// Settings page. Contains `{timer}` / `{duration}` placeholders for
/// the configured form defaults.
pub const SETTINGS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Sprinkler Wifi System</title>
</head>
<body>
<h2>Settings</h2>
<form action="/SPRINKLER" method="post">
  <label for="timer">Set Timer (seconds):</label>
  <input type="number" id="timer" name="timer" min="1" value="{timer}">
  <br><br>
  <label for="duration">Set Duration of Sprinkler in (seconds):</label>
  <input type="number" id="duration" name="duration" min="1" value="{duration}">
  <br><br>
  <input type="submit" value="Set Timer and Duration">
</form>
<div id="error" style="color:#b00"></div>
<script>
  // A rejected configuration redirects back here with ?error=<code>.
  const reasons = {
    missing: "No timer/duration parameters supplied.",
    nonpositive: "Timer and duration must be positive.",
    duration: "Duration must be less than the timer period.",
    malformed: "Timer and duration must be whole seconds."
  };
  const code = new URLSearchParams(window.location.search).get('error');
  if (code) {
    document.getElementById('error').textContent = reasons[code] || "Invalid settings.";
  }
</script>
</body>
</html>
"#;

/// Status page. Reads `timer`/`duration` from the query string (display
/// only) and counts down client-side.
pub const STATUS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Status Page</title>
</head>
<body>
<h1>Status Page</h1>
<br>
<br>
<form action="/" method="GET">
  <input type="submit" value="Back to Settings">
</form>
<h3 id="timer"></h3>
<div id="countdown"></div>
<h3 id="duration"></h3>
<div id="durationcountdown"></div>
  <script>
    function getUrlParams() {
      const urlParams = new URLSearchParams(window.location.search);
      const timer = urlParams.get('timer');
      const duration = urlParams.get('duration');

      document.getElementById('timer').textContent = `Timer is set to ${timer}`;
      document.getElementById('duration').textContent = `Duration of sprinkler is set to ${duration}`;

      startCountdownTimer(parseInt(timer), "countdown", ()=> startCountdownTimer(parseInt(duration), "durationcountdown", ()=> window.location.reload()) )
    }

    function startCountdownTimer(seconds, element, callback = () => {}) {
      var countdownDiv = document.getElementById(element);
      countdownDiv.innerText = seconds + " seconds remaining";

      var timer = setInterval(function() {
        seconds--;
        countdownDiv.innerText = seconds + " seconds remaining";
        if (seconds <= 0) {
          clearInterval(timer)
          countdownDiv.innerText = "Timer completed";
          callback();
          return ;
        }
      }, 1000);
    }

    window.onload = getUrlParams;
  </script>
</body>
</html>
"#;

/// Render the settings page with the configured form defaults.
pub fn settings_page(default_timer_secs: u32, default_duration_secs: u32) -> String {
    SETTINGS_PAGE
        .replace("{timer}", &default_timer_secs.to_string())
        .replace("{duration}", &default_duration_secs.to_string())
}
