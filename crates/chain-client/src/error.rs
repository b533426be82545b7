use efx_primitives::BlockNumber;
use std::fmt::{Display, Formatter};


/// Transient refusal of a remote service to answer, worth retrying.
#[derive(Debug)]
pub struct RateLimited {
    pub message: String
}


impl Display for RateLimited {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "request was rate limited or returned no result: {}", self.message)
    }
}


impl std::error::Error for RateLimited {}


#[derive(Debug)]
pub struct RpcError {
    pub code: i64,
    pub message: String
}


impl Display for RpcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "rpc error {}: {}", self.code, self.message)
    }
}


impl std::error::Error for RpcError {}


#[derive(Debug)]
pub struct BlockNotFound {
    pub block: BlockNumber
}


impl Display for BlockNotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "block {} is not known to the chain node", self.block)
    }
}


impl std::error::Error for BlockNotFound {}
