//! Static page data used across harnesses.

/// A page with one of each record kind, including a few malformed values
/// the loader must tolerate.
pub const SAMPLE_PAGE: &str = r#"
articles:
  - title: Principles
    items:
      - Posture before submissions.
      - Frames: https://example.com/frames
      - [ "See ", { this: "https://example.com" } ]
      - { a: 1, b: 2 }
tables:
  - title: Escapes
    rows:
      - technique: Elbow escape
        position: Mount
        steps: [ bridge, shrimp ]
        dates: [ 2024-01-05, 2024-01-12 ]
      - technique: Trap and roll
        position: Mount
        drills: 12
      - technique: Frame and shrimp
        position: Side control
        videos:
          - { label: Basics, url: "https://example.com/v1" }
          - not a video
trees:
  - title: Guard
    rows:
      - { technique: Kimura, category: Submissions, position: Closed guard }
      - { technique: Armbar, category: Submissions, position: Closed guard }
      - { technique: Triangle, category: Submissions, position: Open guard }
      - { technique: Scissor sweep, category: Sweeps, position: Closed guard }
      - { technique: Hip bump, category: Sweeps, position: Closed guard }
      - { technique: Flower sweep, category: Sweeps, position: Open guard }
"#;

/// `(technique, category, position)` rows: three categories of two
/// positions with two techniques each.
pub const THREE_BY_TWO_BY_TWO: &[(&str, &str, &str)] = &[
    ("kimura", "Submissions", "closed"),
    ("armbar", "Submissions", "closed"),
    ("triangle", "Submissions", "open"),
    ("omoplata", "Submissions", "open"),
    ("scissor", "Sweeps", "closed"),
    ("hip bump", "Sweeps", "closed"),
    ("flower", "Sweeps", "open"),
    ("tripod", "Sweeps", "open"),
    ("elbow escape", "Escapes", "mount"),
    ("trap and roll", "Escapes", "mount"),
    ("frame", "Escapes", "side"),
    ("ghost", "Escapes", "side"),
];
