//! HTML fragments for the search and analysis views.
//!
//! Fragments are single-line so they can travel as SSE `data` fields.
//! Anything marked `data-pending` is a placeholder; the page removes it when
//! the next fragment arrives.

use crate::models::{AnalysisEvent, AudioPreview, Emotion, PredictionResult, TrackFeatures, TrackSummary};
use base64::{engine::general_purpose, Engine as _};

const SHOW_DETAILS: &str = "Show details";
const HIDE_DETAILS: &str = "Hide details";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
    out
}

pub fn format_main(value: f64) -> String {
    format!("{:.3}", value)
}

pub fn format_secondary(value: f64) -> String {
    format!("{:.2}", value)
}

/// Bar width in percent, two decimals
pub fn bar_width(probability: f64) -> String {
    format!("{:.2}", probability * 100.0)
}

pub fn render_suggestions(tracks: &[TrackSummary]) -> String {
    tracks
        .iter()
        .map(|track| {
            let label = escape(&track.display_label());
            format!(
                r#"<li class="suggestion-item" data-track-id="{id}" data-label="{label}"><img class="album-image" src="{src}" alt="{name} Album Cover">{label}</li>"#,
                id = escape(&track.id),
                label = label,
                src = escape(track.album_image_url.as_deref().unwrap_or("")),
                name = escape(&track.name),
            )
        })
        .collect()
}

fn feature_item(label: &str, value: String) -> String {
    format!(
        r#"<div class="feature-item"><span class="feature-label">{}</span><span class="feature-value">{}</span></div>"#,
        label,
        escape(&value)
    )
}

pub fn render_features(features: &TrackFeatures) -> String {
    let main = [
        ("Energy", format_main(features.energy)),
        ("Danceability", format_main(features.danceability)),
        ("Valence", format_main(features.valence)),
        // Tempo and loudness are labelled quantities, not rounded scores
        ("Tempo", format!("{} BPM", features.tempo.round() as i64)),
    ];
    let secondary = [
        ("Acousticness", format_secondary(features.acousticness)),
        ("Instrumentalness", format_secondary(features.instrumentalness)),
        ("Liveness", format_secondary(features.liveness)),
        ("Speechiness", format_secondary(features.speechiness)),
        ("Loudness", format!("{} dB", features.loudness)),
        ("Key", format_secondary(features.key as f64)),
        ("Mode", format_secondary(features.mode as f64)),
    ];

    let main: String = main.into_iter().map(|(l, v)| feature_item(l, v)).collect();
    let secondary: String = secondary.into_iter().map(|(l, v)| feature_item(l, v)).collect();

    format!(
        r#"<div class="features-container"><button type="button" class="toggle-button" data-show="{show}" data-hide="{hide}">{label}</button><div class="main-features">{main}</div><div class="secondary-features hidden">{secondary}</div></div>"#,
        show = SHOW_DETAILS,
        hide = HIDE_DETAILS,
        label = SHOW_DETAILS,
        main = main,
        secondary = secondary,
    )
}

pub fn render_probability_bars(prediction: &PredictionResult) -> String {
    Emotion::ALL
        .iter()
        .map(|&emotion| {
            let width = bar_width(prediction.probability(emotion));
            format!(
                r#"<div class="probability-bar-container"><div class="probability-label">{name}:</div><div class="probability-bar-wrapper"><div class="probability-bar {class}-bar" style="width: {width}%"><span class="probability-text">{width}%</span></div></div></div>"#,
                name = emotion.name(),
                class = emotion.css_class(),
                width = width,
            )
        })
        .collect()
}

pub fn render_prediction(prediction: &PredictionResult) -> String {
    let (name, class) = prediction
        .emotion()
        .map(|e| (e.name(), e.css_class()))
        .unwrap_or(("Unknown", "unknown"));

    format!(
        r#"<div class="prediction-result"><h3>Prediction</h3><p><strong>Dominant emotion:</strong> <span class="emotion {class}">{name}</span></p><div class="probability-bars"><h4>Probability per emotion</h4>{bars}</div></div>"#,
        class = class,
        name = name,
        bars = render_probability_bars(prediction),
    )
}

fn render_audio(preview: &AudioPreview) -> String {
    format!(
        r#"<div class="audio-player"><audio controls><source src="data:{mime};base64,{data}" type="{mime}">Your browser does not support the audio element.</audio></div>"#,
        mime = escape(&preview.content_type),
        data = general_purpose::STANDARD.encode(&preview.data),
    )
}

fn pending(message: &str) -> String {
    format!(
        r#"<div class="loading-status" data-pending><p>{}</p><div class="spinner"></div></div>"#,
        message
    )
}

pub fn render_error(message: &str) -> String {
    format!(r#"<div class="error-message">Error: {}</div>"#, escape(message))
}

/// Fragment for one orchestrator event; `Done` has no markup.
pub fn render_event(event: &AnalysisEvent) -> Option<String> {
    let html = match event {
        AnalysisEvent::Processing => pending("Processing prediction..."),
        AnalysisEvent::Features(features) => render_features(features),
        AnalysisEvent::Prediction(prediction) => render_prediction(prediction),
        AnalysisEvent::PredictionRejected { message } | AnalysisEvent::Failed { message } => {
            render_error(message)
        }
        AnalysisEvent::AudioLoading => pending("Loading audio preview..."),
        AnalysisEvent::AudioReady(preview) => render_audio(preview),
        AnalysisEvent::AudioFailed { message } => format!(
            r#"<div class="error-message audio-unavailable">Audio preview unavailable: {}</div>"#,
            escape(message)
        ),
        AnalysisEvent::Done => return None,
    };
    Some(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_features;
    use bytes::Bytes;

    fn prediction(label: i64, probabilities: Vec<f64>) -> PredictionResult {
        PredictionResult {
            label,
            probabilities,
            preview_available: false,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Rock & Roll"</b>"#),
            "&lt;b&gt;&quot;Rock &amp; Roll&quot;&lt;/b&gt;"
        );
        assert!(!escape("line\nbreak").contains('\n'));
    }

    #[test]
    fn test_suggestions_render_in_order_with_blank_art() {
        let tracks = vec![
            TrackSummary {
                id: "a1".to_string(),
                name: "Imagine".to_string(),
                artists: vec!["John Lennon".to_string()],
                album_image_url: Some("https://images.example/a1.jpg".to_string()),
            },
            TrackSummary {
                id: "b2".to_string(),
                name: "Imagine <Live>".to_string(),
                artists: vec!["A".to_string(), "B".to_string()],
                album_image_url: None,
            },
        ];

        let html = render_suggestions(&tracks);

        assert_eq!(html.matches("<li ").count(), 2);
        assert!(html.find("a1").unwrap() < html.find("b2").unwrap());
        assert!(html.contains(r#"data-label="Imagine by John Lennon""#));
        assert!(html.contains(r#"src="""#));
        assert!(html.contains("Imagine &lt;Live&gt; by A, B"));
        assert!(render_suggestions(&[]).is_empty());
    }

    #[test]
    fn test_feature_precision() {
        let features = sample_features();
        let html = render_features(&features);

        assert!(html.contains(">0.590<"));
        assert!(html.contains(">0.547<"));
        assert!(html.contains(">76 BPM<"));
        assert!(!html.contains("75.752"));
        assert!(html.contains(">0.91<"));
        assert!(html.contains(">0.09<"));
        assert!(html.contains(">-12.358 dB<"));
        assert!(html.contains(">1.00<"));
        // Rendering never touches the underlying values
        assert_eq!(features, sample_features());
    }

    #[test]
    fn test_secondary_panel_hidden_by_default() {
        let html = render_features(&sample_features());
        assert!(html.contains(r#"class="secondary-features hidden""#));
        assert!(html.contains(">Show details</button>"));
    }

    #[test]
    fn test_emotion_names() {
        for (label, name) in [(0, "Sad"), (1, "Happy"), (2, "Energetic"), (3, "Calm"), (4, "Unknown"), (-3, "Unknown")] {
            let html = render_prediction(&prediction(label, vec![0.25; 4]));
            assert!(html.contains(&format!(">{}</span>", name)), "label {}", label);
        }
    }

    #[test]
    fn test_probability_bars_fixed_order_and_width() {
        let html = render_probability_bars(&prediction(1, vec![0.05, 0.80, 0.10, 0.05]));

        let order: Vec<_> = ["Sad:", "Happy:", "Energetic:", "Calm:"]
            .iter()
            .map(|label| html.find(label).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("width: 5.00%"));
        assert!(html.contains("width: 80.00%"));
        assert!(html.contains("width: 10.00%"));
    }

    #[test]
    fn test_bar_width_rounding() {
        assert_eq!(bar_width(0.123456), "12.35");
        assert_eq!(bar_width(1.0), "100.00");
        assert_eq!(bar_width(0.0), "0.00");
    }

    #[test]
    fn test_happy_scenario_has_no_audio() {
        let html = render_event(&AnalysisEvent::Prediction(prediction(1, vec![0.05, 0.80, 0.10, 0.05]))).unwrap();
        assert!(html.contains(r#"<span class="emotion happy">Happy</span>"#));
        assert!(!html.contains("<audio"));
    }

    #[test]
    fn test_rejection_renders_message_without_bars() {
        let html = render_event(&AnalysisEvent::PredictionRejected {
            message: "model unavailable".to_string(),
        })
        .unwrap();
        assert!(html.contains("Error: model unavailable"));
        assert!(!html.contains("probability-bar"));
    }

    #[test]
    fn test_audio_is_embedded_as_data_url() {
        let html = render_event(&AnalysisEvent::AudioReady(AudioPreview {
            content_type: "audio/wav".to_string(),
            data: Bytes::from_static(b"RIFF"),
        }))
        .unwrap();
        assert!(html.contains(r#"src="data:audio/wav;base64,UklGRg==""#));
    }

    #[test]
    fn test_pending_markers() {
        assert!(render_event(&AnalysisEvent::Processing).unwrap().contains("data-pending"));
        assert!(render_event(&AnalysisEvent::AudioLoading).unwrap().contains("data-pending"));
        assert!(!render_event(&AnalysisEvent::Failed { message: "x".into() }).unwrap().contains("data-pending"));
        assert_eq!(render_event(&AnalysisEvent::Done), None);
    }
}
