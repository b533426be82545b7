use efx_primitives::{BlockNumber, UnixTime};
use futures::future::BoxFuture;
use std::sync::Arc;


/// Access to the chain itself: block timestamps and the current height.
pub trait ChainTimeLookup: Sync {
    fn block_timestamp(&self, block: BlockNumber) -> BoxFuture<'_, anyhow::Result<UnixTime>>;

    fn current_height(&self) -> BoxFuture<'_, anyhow::Result<BlockNumber>>;
}


/// Block-explorer style lookup of the block mined at a given moment.
pub trait BlockExplorerLookup: Sync {
    /// Number of the last block mined at or before `time`.
    ///
    /// Rate limiting and empty results surface as [crate::RateLimited].
    fn block_at_or_before(&self, time: UnixTime) -> BoxFuture<'_, anyhow::Result<BlockNumber>>;
}


impl<'a, T: ChainTimeLookup + ?Sized> ChainTimeLookup for &'a T {
    fn block_timestamp(&self, block: BlockNumber) -> BoxFuture<'_, anyhow::Result<UnixTime>> {
        (**self).block_timestamp(block)
    }

    fn current_height(&self) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        (**self).current_height()
    }
}


impl<T: ChainTimeLookup + Send + ?Sized> ChainTimeLookup for Arc<T> {
    fn block_timestamp(&self, block: BlockNumber) -> BoxFuture<'_, anyhow::Result<UnixTime>> {
        self.as_ref().block_timestamp(block)
    }

    fn current_height(&self) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        self.as_ref().current_height()
    }
}


impl<'a, T: BlockExplorerLookup + ?Sized> BlockExplorerLookup for &'a T {
    fn block_at_or_before(&self, time: UnixTime) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        (**self).block_at_or_before(time)
    }
}


impl<T: BlockExplorerLookup + Send + ?Sized> BlockExplorerLookup for Arc<T> {
    fn block_at_or_before(&self, time: UnixTime) -> BoxFuture<'_, anyhow::Result<BlockNumber>> {
        self.as_ref().block_at_or_before(time)
    }
}
