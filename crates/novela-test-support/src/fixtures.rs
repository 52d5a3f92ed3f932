//! Story documents shared by tests across crates.

/// Intro offers two branches; only `s2` exists, `s1` is dangling.
pub const MISSING_BRANCH_STORY: &str = r#"{
  "intro": {
    "id": "intro",
    "text": "Una calle infinita.",
    "question": "¿Hacia dónde vas?",
    "choices": [
      { "text": "Left", "nextScene": "s1" },
      { "text": "Right", "nextScene": "s2" }
    ]
  },
  "scenes": [
    { "id": "s2", "text": "Un callejón que huele a lluvia.", "nextScene": "final" }
  ],
  "finals": {
    "good": { "title": "Amanecer", "text": "Encontraste la salida." },
    "neutral": { "title": "Penumbra", "text": "Seguís caminando." },
    "bad": { "title": "Noche", "text": "La calle te tragó." }
  }
}"#;

/// Intro continues straight into a three-step ordering puzzle whose correct
/// order is C, A, B.
pub const ORDERING_STORY: &str = r#"{
  "intro": { "id": "intro", "text": "Una puerta con tres cerrojos.", "nextScene": "puzzle" },
  "scenes": [
    {
      "id": "puzzle",
      "type": "ordering",
      "text": "Abrí los cerrojos en orden.",
      "question": "¿En qué orden?",
      "steps": ["A", "B", "C"],
      "correctOrder": [2, 0, 1],
      "transitionSuccess": "La puerta cede.",
      "nextScene": "final"
    }
  ],
  "finals": {
    "good": { "title": "Amanecer", "text": "Encontraste la salida." },
    "neutral": { "title": "Penumbra", "text": "Seguís caminando." },
    "bad": { "title": "Noche", "text": "La calle te tragó." }
  }
}"#;

/// Every scene kind: choice intro, free-text riddle, linear bridge, ordering
/// puzzle, an inert dead end and the three endings.
pub const SAMPLE_STORY: &str = r#"{
  "intro": {
    "id": "intro",
    "text": "Despertás frente a una vidriera rota.",
    "question": "¿Qué hacés?",
    "choices": [
      { "text": "Entrar", "nextScene": "riddle" },
      { "text": "Seguir de largo", "nextScene": "bridge" },
      { "text": "Quedarte quieto", "nextScene": "void" }
    ]
  },
  "scenes": [
    {
      "id": "riddle",
      "type": "input",
      "text": "Una voz pregunta por lo que responde sin boca.",
      "question": "¿Qué es?",
      "answer": "eco",
      "transitionSuccess": "La voz se ríe.",
      "nextScene": "bridge"
    },
    { "id": "bridge", "text": "Un puente sobre nada.", "nextScene": "locks" },
    {
      "id": "locks",
      "type": "ordering",
      "text": "Tres cerrojos.",
      "question": "Ordenalos.",
      "steps": ["A", "B", "C"],
      "correctOrder": [2, 0, 1],
      "nextScene": "final"
    },
    { "id": "void", "text": "Nada ocurre." }
  ],
  "finals": {
    "good": { "title": "Amanecer", "text": "Encontraste la salida." },
    "neutral": { "title": "Penumbra", "text": "Seguís caminando." },
    "bad": { "title": "Noche", "text": "La calle te tragó." }
  }
}"#;
