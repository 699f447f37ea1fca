use std::path::Path;

/// Decodes the best audio stream of a media file to mono f32 PCM at the given
/// sample rate.
pub fn decode_mono(
    path: &Path,
    target_sample_rate: u32,
) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    ffmpeg_next::init()?;

    let mut ictx = ffmpeg_next::format::input(path)
        .map_err(|e| format!("Failed to open audio {}: {e}", path.display()))?;

    let audio_stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Audio)
        .ok_or_else(|| format!("No audio stream in {}", path.display()))?;
    let audio_stream_index = audio_stream.index();

    let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(audio_stream.parameters())?;
    let mut decoder = codec_ctx.decoder().audio()?;

    let mut resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
        ffmpeg_next::ChannelLayout::MONO,
        target_sample_rate,
    )?;

    let mut samples: Vec<f32> = Vec::new();
    let mut decoded = ffmpeg_next::util::frame::audio::Audio::empty();
    let mut resampled = ffmpeg_next::util::frame::audio::Audio::empty();

    for (stream, packet) in ictx.packets() {
        if stream.index() != audio_stream_index {
            continue;
        }
        decoder.send_packet(&packet)?;
        while decoder.receive_frame(&mut decoded).is_ok() {
            resampler.run(&decoded, &mut resampled)?;
            extend_with_plane(&resampled, &mut samples);
        }
    }

    decoder.send_eof()?;
    while decoder.receive_frame(&mut decoded).is_ok() {
        resampler.run(&decoded, &mut resampled)?;
        extend_with_plane(&resampled, &mut samples);
    }

    if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
        if delay.output > 0 {
            extend_with_plane(&resampled, &mut samples);
        }
    }

    log::debug!(
        "Decoded {:.1}s of audio from {}",
        samples.len() as f64 / target_sample_rate as f64,
        path.display()
    );
    Ok(samples)
}

fn extend_with_plane(frame: &ffmpeg_next::util::frame::audio::Audio, out: &mut Vec<f32>) {
    if frame.samples() == 0 {
        return;
    }
    out.extend_from_slice(&frame.plane::<f32>(0)[..frame.samples()]);
}
