//! `Api3ServerV1` contract binding.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IApi3ServerV1 {
        function dapiNameToDataFeedId(bytes32 dapiName) external view returns (bytes32);

        function readDataFeedWithId(bytes32 dataFeedId)
            external
            view
            returns (int224 value, uint32 timestamp);
    }
}
