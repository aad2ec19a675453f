//! WAV container helpers
//!
//! The provider's TTS returns raw 16-bit little-endian PCM at 24 kHz.
//! Browsers will not play bare PCM, so the samples are wrapped in a WAV
//! container and shipped as a base64 data URI.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use hound::{SampleFormat, WavSpec, WavWriter};

use crate::SpeechError;

/// Fixed output format: mono, 24 kHz, 16-bit
pub const WAV_SPEC: WavSpec = WavSpec {
    channels: 1,
    sample_rate: 24_000,
    bits_per_sample: 16,
    sample_format: SampleFormat::Int,
};

/// Wrap raw 16-bit LE PCM bytes in a WAV container
pub fn pcm_to_wav(pcm: &[u8]) -> Result<Vec<u8>, SpeechError> {
    if pcm.is_empty() {
        return Err(SpeechError::NoAudio);
    }
    if pcm.len() % 2 != 0 {
        return Err(SpeechError::InvalidAudio(
            "PCM payload has an odd byte length".to_string(),
        ));
    }

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, WAV_SPEC)?;
        for sample in pcm.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Encode raw PCM as a `data:audio/wav;base64,...` URI
pub fn wav_data_uri(pcm: &[u8]) -> Result<String, SpeechError> {
    let wav = pcm_to_wav(pcm)?;
    Ok(format!(
        "data:audio/wav;base64,{}",
        BASE64_STANDARD.encode(wav)
    ))
}

/// Split a `data:<mime>;base64,<payload>` URI into its MIME type and payload
///
/// Returns `None` for anything that is not a base64 data URI.
pub fn strip_data_uri(uri: &str) -> Option<(&str, &str)> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, data) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    Some((mime, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn test_wav_roundtrip() {
        let samples: Vec<i16> = vec![0, 1000, -1000, i16::MAX, i16::MIN];
        let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        let wav = pcm_to_wav(&pcm).unwrap();
        let reader = WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec(), WAV_SPEC);

        let decoded: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn test_empty_pcm_rejected() {
        assert!(matches!(pcm_to_wav(&[]), Err(SpeechError::NoAudio)));
    }

    #[test]
    fn test_odd_length_rejected() {
        assert!(matches!(
            pcm_to_wav(&[0, 1, 2]),
            Err(SpeechError::InvalidAudio(_))
        ));
    }

    #[test]
    fn test_data_uri_shape() {
        let uri = wav_data_uri(&[0, 0, 1, 0]).unwrap();
        assert!(uri.starts_with("data:audio/wav;base64,"));

        let (mime, payload) = strip_data_uri(&uri).unwrap();
        assert_eq!(mime, "audio/wav");
        assert!(BASE64_STANDARD.decode(payload).is_ok());
    }

    #[test]
    fn test_strip_data_uri_variants() {
        let (mime, data) = strip_data_uri("data:audio/pcm;rate=24000;base64,AAAA").unwrap();
        assert_eq!(mime, "audio/pcm;rate=24000");
        assert_eq!(data, "AAAA");

        assert!(strip_data_uri("not a uri").is_none());
        assert!(strip_data_uri("data:audio/pcm,plain").is_none());
    }
}
