use crate::parser::{LYRICS_MARKER, STYLE_MARKER};

/// Build the SUNO songwriting prompt for a topic.
///
/// The model is asked to answer under [`STYLE_MARKER`] and [`LYRICS_MARKER`]
/// so the reply can be split by [`crate::parser::SongSheet::parse`].
pub fn build(topic: &str) -> String {
    format!(
        "다음 주제를 바탕으로 SUNO AI에서 사용할 수 있는 노래 가사와 스타일을 생성해주세요.

주제: {topic}

다음 형식으로 출력해주세요:

{STYLE_MARKER}
[장르, 분위기, BPM, 악기 구성 등을 포함한 상세한 스타일 설명]

{LYRICS_MARKER}
[Verse 1]
[가사 내용]

[Chorus]
[가사 내용]

[Verse 2]
[가사 내용]

[Chorus]
[가사 내용]

[Bridge]
[가사 내용]

[Outro]
[가사 내용]

SUNO AI에서 사용할 수 있도록 구체적이고 상세한 스타일 정보와 감정적인 가사를 작성해주세요."
    )
}
