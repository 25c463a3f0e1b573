// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feed documents shared by unit tests

pub const SAMPLE_SEARCH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:newznab="http://www.newznab.com/DTD/2010/feeds/attributes/">
  <channel>
    <atom:link href="https://www.usenet-crawler.com/api" rel="self" type="application/rss+xml" />
    <title>usenet-crawler</title>
    <description>usenet-crawler API results</description>
    <link>https://www.usenet-crawler.com/</link>
    <language>en-gb</language>
    <webMaster>admin@usenet-crawler.com (usenet-crawler)</webMaster>
    <category></category>
    <image>
      <url>https://www.usenet-crawler.com/templates/default/images/banner.jpg</url>
      <title>usenet-crawler</title>
      <link>https://www.usenet-crawler.com/</link>
      <description>Visit usenet-crawler</description>
      <width>468</width>
      <height>60</height>
    </image>
    <newznab:response offset="0" total="2" />
    <item>
      <title>Show.S01E02.720p.HDTV.x264-GROUP</title>
      <guid isPermaLink="true">https://www.usenet-crawler.com/details/abc123</guid>
      <link>https://www.usenet-crawler.com/getnzb/abc123.nzb</link>
      <comments>https://www.usenet-crawler.com/details/abc123#comments</comments>
      <pubDate>Tue, 15 Mar 2016 20:00:00 -0400</pubDate>
      <category>TV &gt; HD</category>
      <description>Show.S01E02.720p.HDTV.x264-GROUP</description>
      <enclosure url="https://www.usenet-crawler.com/getnzb/abc123.nzb" length="1234567890" type="application/x-nzb" />
      <newznab:attr name="category" value="5000" />
      <newznab:attr name="category" value="5040" />
      <newznab:attr name="size" value="1234567890" />
      <newznab:attr name="guid" value="abc123" />
      <newznab:attr name="grabs" value="42" />
      <newznab:attr name="comments" value="3" />
      <newznab:attr name="tvairdate" value="Mon, 14 Mar 2016 21:00:00 -0400" />
    </item>
    <item>
      <title>Show.S01E02.HDTV.x264-OTHER</title>
      <guid isPermaLink="false">def456</guid>
      <description>second</description>
      <newznab:attr name="guid" value="def456" />
    </item>
  </channel>
</rss>"#;

pub const SAMPLE_COMMENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>usenet-crawler comments</title>
    <description>Comments for abc123</description>
    <item>
      <title>first</title>
      <description>Great quality, thanks</description>
      <pubDate>Wed, 16 Mar 2016 10:00:00 +0000</pubDate>
    </item>
    <item>
      <title>second</title>
      <description>Audio out of sync</description>
      <pubDate>last tuesday</pubDate>
    </item>
    <item>
      <title>third</title>
      <description>Works fine here</description>
      <pubDate>Thu, 17 Mar 2016 08:15:30 +0100</pubDate>
    </item>
  </channel>
</rss>"#;
