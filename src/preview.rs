use bytes::{Buf as _, Bytes, BytesMut};
use futures::{StreamExt as _, stream::BoxStream};

use crate::{ThetaError, ThetaResult, transport::ByteStream};

/// JPEG start of image marker.
const SOI: [u8; 2] = [0xFF, 0xD8];

/// JPEG end of image marker.
const EOI: [u8; 2] = [0xFF, 0xD9];

/// Stream of JPEG frames of the live preview. Dropping it closes the connection to the camera.
pub type FrameStream = BoxStream<'static, ThetaResult<Bytes>>;

fn find(haystack: &[u8], marker: &[u8; 2]) -> Option<usize> {
    haystack.windows(2).position(|window| window == marker)
}

/// Cuts the next complete JPEG frame out of the buffer. Bytes in front of the frame
/// (multipart boundaries and headers) are discarded.
fn next_frame(buf: &mut BytesMut) -> Option<Bytes> {
    let Some(start) = find(buf, &SOI) else {
        // A trailing 0xFF may be the first half of the next marker.
        let keep = usize::from(buf.last() == Some(&0xFF));
        let discard = buf.len() - keep;
        buf.advance(discard);
        return None;
    };

    buf.advance(start);

    let end = find(&buf[SOI.len()..], &EOI)? + SOI.len() + EOI.len();

    Some(buf.split_to(end).freeze())
}

/// Turns the multipart preview body into a stream of frames.
///
/// The stream ends after the body ends or after the first transport error.
pub fn frames(body: ByteStream) -> FrameStream {
    futures::stream::unfold(
        (Some(body), BytesMut::new()),
        |(mut body, mut buf)| async move {
            loop {
                if let Some(frame) = next_frame(&mut buf) {
                    return Some((Ok(frame), (body, buf)));
                }

                let chunk = body.as_mut()?.next().await;

                match chunk {
                    Some(Ok(chunk)) => buf.extend_from_slice(&chunk),
                    Some(Err(e)) => return Some((Err(ThetaError::from(e)), (None, buf))),
                    None => return None,
                }
            }
        },
    )
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    fn jpeg(payload: &[u8]) -> Vec<u8> {
        [&SOI[..], payload, &EOI[..]].concat()
    }

    fn part(frame: &[u8]) -> Vec<u8> {
        let header = format!(
            "--boundary\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
            frame.len()
        );

        [header.as_bytes(), frame, b"\r\n"].concat()
    }

    #[test]
    fn cuts_frames_out_of_multipart_data() {
        let first = jpeg(b"first");
        let second = jpeg(b"second");

        let mut buf = BytesMut::new();
        buf.extend_from_slice(&part(&first));
        buf.extend_from_slice(&part(&second));

        assert_eq!(next_frame(&mut buf).as_deref(), Some(&first[..]));
        assert_eq!(next_frame(&mut buf).as_deref(), Some(&second[..]));
        assert_eq!(next_frame(&mut buf), None);
        assert!(buf.len() <= 1);
    }

    #[test]
    fn incomplete_frame_waits_for_more_data() {
        let mut buf = BytesMut::from(&b"--boundary\r\n\r\n\xFF\xD8abc"[..]);

        assert_eq!(next_frame(&mut buf), None);
        assert_eq!(&buf[..], b"\xFF\xD8abc");

        buf.extend_from_slice(b"\xFF\xD9");
        assert_eq!(next_frame(&mut buf).as_deref(), Some(&b"\xFF\xD8abc\xFF\xD9"[..]));
    }

    #[tokio::test]
    async fn frames_split_across_chunks() {
        let data = [part(&jpeg(b"one")), part(&jpeg(b"two"))].concat();
        let chunks: Vec<Result<Bytes, TransportError>> = data
            .chunks(5)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();

        let frames: Vec<_> = frames(futures::stream::iter(chunks).boxed()).collect().await;

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].as_ref().unwrap(), &Bytes::from(jpeg(b"one")));
        assert_eq!(frames[1].as_ref().unwrap(), &Bytes::from(jpeg(b"two")));
    }

    #[tokio::test]
    async fn stream_ends_after_transport_error() {
        let chunks: Vec<Result<Bytes, TransportError>> = vec![
            Ok(Bytes::from(part(&jpeg(b"ok")))),
            Err(TransportError::Other("connection reset".to_string())),
            Ok(Bytes::from(part(&jpeg(b"never")))),
        ];

        let frames: Vec<_> = frames(futures::stream::iter(chunks).boxed()).collect().await;

        assert_eq!(frames.len(), 2);
        assert!(frames[0].is_ok());
        assert!(matches!(frames[1], Err(ThetaError::NotConnected(_))));
    }
}
