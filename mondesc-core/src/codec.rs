use std::marker::PhantomData;

use prost::Message;
use tonic::codec::{BufferSettings, Codec, Decoder, Encoder};
use tonic::Status;

/// A gRPC codec for statically typed prost messages.
///
/// `E` is the request message sent to the server, `D` the response message
/// decoded from it. The wire messages in [`crate::pb`] are declared by hand,
/// so there is no generated client to supply a codec for them.
pub struct MessageCodec<E, D> {
    _marker: PhantomData<fn(E) -> D>,
}

impl<E, D> MessageCodec<E, D> {
    pub fn new() -> Self {
        MessageCodec {
            _marker: PhantomData,
        }
    }
}

impl<E, D> Default for MessageCodec<E, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, D> Codec for MessageCodec<E, D>
where
    E: Message + Send + 'static,
    D: Message + Default + Send + 'static,
{
    type Encode = E;
    type Decode = D;
    type Encoder = MessageEncoder<E>;
    type Decoder = MessageDecoder<D>;

    fn encoder(&mut self) -> Self::Encoder {
        MessageEncoder {
            _marker: PhantomData,
        }
    }

    fn decoder(&mut self) -> Self::Decoder {
        MessageDecoder {
            _marker: PhantomData,
        }
    }
}

/// Encodes a request message into protobuf wire format.
pub struct MessageEncoder<E> {
    _marker: PhantomData<fn(E)>,
}

impl<E: Message> Encoder for MessageEncoder<E> {
    type Item = E;
    type Error = Status;

    fn encode(
        &mut self,
        item: Self::Item,
        dst: &mut tonic::codec::EncodeBuf<'_>,
    ) -> Result<(), Self::Error> {
        item.encode(dst)
            .map_err(|e| Status::internal(format!("failed to encode request: {e}")))?;
        Ok(())
    }

    fn buffer_settings(&self) -> BufferSettings {
        BufferSettings::default()
    }
}

/// Decodes protobuf wire format into a response message.
pub struct MessageDecoder<D> {
    _marker: PhantomData<fn() -> D>,
}

impl<D: Message + Default> Decoder for MessageDecoder<D> {
    type Item = D;
    type Error = Status;

    fn decode(
        &mut self,
        src: &mut tonic::codec::DecodeBuf<'_>,
    ) -> Result<Option<Self::Item>, Self::Error> {
        let msg = D::decode(src)
            .map_err(|e| Status::internal(format!("failed to decode response: {e}")))?;
        Ok(Some(msg))
    }

    fn buffer_settings(&self) -> BufferSettings {
        BufferSettings::default()
    }
}
